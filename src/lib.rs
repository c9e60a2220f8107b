//! Shared table components for the suite's power-quality tools, built on
//! `iced`.
//!
//! The crate centers on a record [`Table`] widget driven by a
//! [`RecordSource`]: plain [`Rows`], selectable [`SelectRows`], filtered
//! [`SearchRows`], or schemaless [`DynamicRows`]. Around it live the
//! suite's data shapes ([`model`]), shared glyphs ([`symbols`]), small
//! utilities ([`create_guid`], [`is_cron`]), and the [`settings`] editor
//! state.
use iced::Element;

pub mod datatable;
pub mod model;
pub mod settings;
pub use datatable::*;

/// Creates a [`Table`] over the given record source, rendering body cells
/// with `view_cell`.
pub fn table<'a, Data, T, Message, Theme, Renderer>(
    data: &'a Data,
    view_cell: impl Fn(&'a Column<T>, usize, &'a T) -> Element<'a, Message, Theme, Renderer>
    + 'static,
) -> Table<'a, Data, T, Message, Theme, Renderer>
where
    Data: RecordSource<T>,
    T: 'a,
    Message: Clone + 'a,
    Theme: Catalog + 'a,
    Renderer: iced::advanced::text::Renderer + 'a,
{
    Table::new(data, view_cell)
}
