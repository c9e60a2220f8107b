//! A record table widget for `iced`, generic over the record type.
//!
//! The widget renders an ordered column list over a [`RecordSource`]: one
//! header cell per column and one body row per record, in source order. It
//! owns no data; interactions are emitted as [`Action`]s for the record
//! source to [`perform`](RecordSource::perform) and as [`Instruction`]s for
//! the application to handle with more context.
//!
//! Record sources cover the family of tables used across the suite:
//!
//! - [`Rows`]: plain rows in caller order (the caller reorders on sort).
//! - [`SelectRows`]: a keyed selection set plus local stable sorting.
//! - [`SearchRows`]: a free-text filter driven by a caller predicate.
//! - [`DynamicRows`]: columns derived from the keys of the first record.
use iced::advanced::widget::{self, tree, Tree, Widget};
use iced::advanced::{layout, mouse, renderer, Clipboard, Layout, Shell};
use iced::widget::text;
use iced::{event, Border, Color, Element, Length, Point, Rectangle, Size, Vector};

mod action;
mod column;
mod content;
pub mod symbols;
mod theme;
mod update;
mod utils;

pub use action::{Action, CellClick, Instruction, SortRequest};
pub use column::{CellValue, Column};
pub use content::dynamic::{DynamicRows, Record};
pub use content::rows::Rows;
pub use content::search::SearchRows;
pub use content::select::SelectRows;
pub use content::{Internal, RecordSource, SortState};
pub use theme::*;
pub use update::{Binding, KeyPress, Motion, Update};
pub use utils::*;

pub struct Table<'a, Data, T, Message, Theme, Renderer>
where
    Data: RecordSource<T>,
    Message: Clone,
    Theme: Catalog,
{
    // The source data
    data: &'a Data,
    // Header cells followed by body cells, row-major
    cells: Vec<Element<'a, Message, Theme, Renderer>>,
    // The number of columns
    columns: usize,
    // The width of the table
    width: Length,
    // The height of the table
    height: Length,
    // The height of the header row
    header_height: f32,
    // The height of each body row
    row_height: f32,
    // Whether to show gridlines
    show_gridlines: bool,
    // The function that is called when an action is performed in the table
    on_action: Option<Box<dyn Fn(Action) -> Message + 'a>>,
    // The function that is called when an instruction is emitted by the table
    on_instruction: Option<Box<dyn Fn(Instruction) -> Message + 'a>>,
    // The function that is called to produce key bindings on key presses
    key_binding: Option<Box<dyn Fn(KeyPress) -> Option<Binding<Message>> + 'a>>,
    // The style class of the table
    class: <Theme as Catalog>::Class<'a>,

    _record: std::marker::PhantomData<T>,
}

impl<'a, Data, T: 'a, Message, Theme, Renderer> Table<'a, Data, T, Message, Theme, Renderer>
where
    Data: RecordSource<T>,
    Message: Clone,
    Theme: Catalog,
    Renderer: iced::advanced::text::Renderer,
{
    pub fn new(
        data: &'a Data,
        view_cell: impl Fn(&'a Column<T>, usize, &'a T) -> Element<'a, Message, Theme, Renderer>
        + 'static,
    ) -> Self
    where
        Message: 'a,
        Theme: 'a,
        Renderer: 'a,
    {
        let columns = data.columns().len();
        let mut cells = Vec::with_capacity(columns * (data.row_count() + 1));

        for (index, column) in data.columns().iter().enumerate() {
            cells.push(header_cell(column, index, data.sort()));
        }

        for row in 0..data.row_count() {
            if let Some(record) = data.record(row) {
                for column in data.columns() {
                    cells.push(view_cell(column, row, record));
                }
            }
        }

        Self {
            data,
            cells,
            columns,
            width: Length::Fill,
            height: Length::Shrink,
            header_height: 24.0,
            row_height: 20.0,
            show_gridlines: true,
            on_action: None,
            on_instruction: None,
            key_binding: None,
            class: <Theme as Catalog>::default(),
            _record: std::marker::PhantomData,
        }
    }

    /// Sets the width of the [`Table`].
    pub fn with_width(mut self, width: impl Into<Length>) -> Self {
        self.width = width.into();
        self
    }

    /// Sets the height of the [`Table`].
    pub fn with_height(mut self, height: impl Into<Length>) -> Self {
        self.height = height.into();
        self
    }

    /// Sets the height of the header row.
    pub fn header_height(mut self, height: f32) -> Self {
        self.header_height = height.max(1.0);
        self
    }

    /// Sets the height of each body row.
    pub fn row_height(mut self, height: f32) -> Self {
        self.row_height = height.max(1.0);
        self
    }

    /// Sets whether to show gridlines in the [`Table`].
    pub fn show_gridlines(mut self, show: bool) -> Self {
        self.show_gridlines = show;
        self
    }

    /// Sets the message that should be produced when some action is
    /// performed in the [`Table`].
    ///
    /// If this method is not called, the [`Table`] will be disabled.
    pub fn on_action(mut self, on_action: impl Fn(Action) -> Message + 'a) -> Self {
        self.on_action = Some(Box::new(on_action));
        self
    }

    /// Sets the message that should be produced when some instruction is
    /// given by the [`Table`].
    pub fn on_instruction(
        mut self,
        on_instruction: impl Fn(Instruction) -> Message + 'a,
    ) -> Self {
        self.on_instruction = Some(Box::new(on_instruction));
        self
    }

    /// Sets the closure to produce key bindings on key presses.
    ///
    /// See [`Binding`] for the list of available bindings.
    pub fn key_binding(
        mut self,
        key_binding: impl Fn(KeyPress) -> Option<Binding<Message>> + 'a,
    ) -> Self {
        self.key_binding = Some(Box::new(key_binding));
        self
    }

    /// Sets the style of the [`Table`].
    #[must_use]
    pub fn style(mut self, style: impl Fn(&Theme, Status) -> Style + 'a) -> Self
    where
        <Theme as Catalog>::Class<'a>: From<StyleFn<'a, Theme>>,
    {
        self.class = (Box::new(style) as StyleFn<'a, Theme>).into();
        self
    }

    /// Sets the style class of the [`Table`].
    #[must_use]
    pub fn class(mut self, class: impl Into<<Theme as Catalog>::Class<'a>>) -> Self {
        self.class = class.into();
        self
    }
}

fn header_cell<'a, T, Message, Theme, Renderer>(
    column: &'a Column<T>,
    index: usize,
    sort: Option<&SortState>,
) -> Element<'a, Message, Theme, Renderer>
where
    Message: 'a,
    Theme: Catalog + 'a,
    Renderer: iced::advanced::text::Renderer + 'a,
{
    let label = match sort {
        Some(sort) if sort.column == index => {
            let glyph = if sort.ascending {
                symbols::SORT_ASCENDING
            } else {
                symbols::SORT_DESCENDING
            };
            format!("{} {glyph}", column.label())
        }
        _ => column.label().to_owned(),
    };

    text(label).size(13).into()
}

/// Renders a body cell as the raw field value. The default cell view when a
/// column needs no custom rendering.
pub fn text_cell<'a, T, Message, Theme, Renderer>(
    column: &'a Column<T>,
    record: &'a T,
) -> Element<'a, Message, Theme, Renderer>
where
    Message: 'a,
    Theme: Catalog + 'a,
    Renderer: iced::advanced::text::Renderer + 'a,
{
    text(column.value(record).to_string()).size(13).into()
}

impl<'a, Data, T, Message, Theme, Renderer> Widget<Message, Theme, Renderer>
    for Table<'a, Data, T, Message, Theme, Renderer>
where
    Data: RecordSource<T>,
    Message: Clone + 'a,
    Theme: Catalog,
    Renderer: iced::advanced::text::Renderer,
{
    fn tag(&self) -> tree::Tag {
        tree::Tag::of::<State>()
    }

    fn state(&self) -> tree::State {
        tree::State::new(State::from_data(
            self.data,
            self.header_height,
            self.row_height,
        ))
    }

    fn size(&self) -> Size<Length> {
        Size {
            width: self.width,
            height: self.height,
        }
    }

    fn diff(&self, tree: &mut Tree) {
        let state = tree.state.downcast_ref::<State>();

        // check if dimensions have changed
        if self.data.row_count() != state.region.row_count
            || self.columns != state.region.column_count
        {
            tree.state = tree::State::new(State::from_data(
                self.data,
                self.header_height,
                self.row_height,
            ));
        }

        tree.diff_children(&self.cells);
    }

    fn children(&self) -> Vec<widget::Tree> {
        self.cells.iter().map(Tree::new).collect()
    }

    fn layout(
        &self,
        tree: &mut widget::Tree,
        renderer: &Renderer,
        limits: &layout::Limits,
    ) -> layout::Node {
        let state = tree.state.downcast_mut::<State>();

        let intrinsic = Size::new(
            state.region.total_raw_width(),
            state.region.total_height(),
        );
        let size = limits.resolve(self.width, self.height, intrinsic);

        state.region.scale_to_bounds(size);

        let children = self
            .cells
            .iter()
            .enumerate()
            .map(|(index, cell)| {
                let row = index / self.columns.max(1);
                let col = index % self.columns.max(1);

                let cell_size = state.region.cell_size(row, col);
                let cell_limits = layout::Limits::new(cell_size, cell_size);

                let node =
                    cell.as_widget()
                        .layout(&mut tree.children[index], renderer, &cell_limits);

                node.move_to(state.region.cell_position(row, col))
            })
            .collect();

        layout::Node::with_children(size, children)
    }

    fn draw(
        &self,
        tree: &Tree,
        renderer: &mut Renderer,
        theme: &Theme,
        defaults: &renderer::Style,
        layout: Layout<'_>,
        cursor: mouse::Cursor,
        viewport: &Rectangle,
    ) {
        if self.columns == 0 {
            return;
        }

        let state = tree.state.downcast_ref::<State>();
        let bounds = layout.bounds();
        let offset = Vector::new(bounds.x, bounds.y);
        let status = if self.on_action.is_none() {
            Status::Disabled
        } else if state.is_focused {
            Status::Focused
        } else {
            Status::Unfocused
        };

        let style = Catalog::style(theme, &self.class, status);

        renderer.fill_quad(
            renderer::Quad {
                bounds,
                border: Border::default(),
                ..Default::default()
            },
            style.background,
        );

        renderer.fill_quad(
            renderer::Quad {
                bounds: Rectangle {
                    x: bounds.x,
                    y: bounds.y,
                    width: bounds.width,
                    height: state.region.header_height,
                },
                border: Border::default(),
                ..Default::default()
            },
            style.header,
        );

        let hovered = cursor
            .position_in(bounds)
            .and_then(|position| state.region.hit(position))
            .and_then(Hit::row);

        for row in 0..state.region.row_count {
            let row_bounds = state.region.row_bounds(row, bounds.width) + offset;

            if row % 2 == 1 {
                renderer.fill_quad(
                    renderer::Quad {
                        bounds: row_bounds,
                        border: Border::default(),
                        ..Default::default()
                    },
                    style.stripe,
                );
            }

            if self.data.is_selected(row) {
                renderer.fill_quad(
                    renderer::Quad {
                        bounds: row_bounds,
                        border: Border::default(),
                        ..Default::default()
                    },
                    style.selection.fill,
                );
            }

            if hovered == Some(row) {
                renderer.fill_quad(
                    renderer::Quad {
                        bounds: row_bounds,
                        border: Border::default(),
                        ..Default::default()
                    },
                    style.hovered,
                );
            }

            if self.data.active() == Some(row) {
                renderer.fill_quad(
                    renderer::Quad {
                        bounds: row_bounds,
                        border: Border {
                            width: style.selection.stroke_width,
                            color: style.selection.stroke,
                            radius: 0.0.into(),
                        },
                        ..Default::default()
                    },
                    Color::TRANSPARENT,
                );
            }
        }

        if self.show_gridlines {
            // Intermediate vertical lines at cumulative column edges
            for x in state
                .region
                .cumulative_x
                .iter()
                .take(self.columns.saturating_sub(1))
            {
                renderer.fill_quad(
                    renderer::Quad {
                        bounds: Rectangle {
                            x: bounds.x + x - style.gridlines.width / 2.0,
                            y: bounds.y,
                            width: style.gridlines.width,
                            height: bounds.height,
                        },
                        border: Border::default(),
                        ..Default::default()
                    },
                    style.gridlines.color,
                );
            }

            // Header separator plus a line between consecutive body rows
            let mut y = bounds.y + state.region.header_height;
            for _ in 0..state.region.row_count {
                renderer.fill_quad(
                    renderer::Quad {
                        bounds: Rectangle {
                            x: bounds.x,
                            y: y - style.gridlines.width / 2.0,
                            width: bounds.width,
                            height: style.gridlines.width,
                        },
                        border: Border::default(),
                        ..Default::default()
                    },
                    style.gridlines.color,
                );
                y += state.region.row_height;
            }
        }

        // Outer border
        renderer.fill_quad(
            renderer::Quad {
                bounds,
                border: style.border,
                ..Default::default()
            },
            Color::TRANSPARENT,
        );

        // Draw children
        if let Some(clipped_viewport) = bounds.intersection(viewport) {
            for (child, (tree, layout)) in self
                .cells
                .iter()
                .zip(tree.children.iter().zip(layout.children()))
                .filter(|(_, (_, layout))| layout.bounds().intersects(&clipped_viewport))
            {
                child.as_widget().draw(
                    tree,
                    renderer,
                    theme,
                    defaults,
                    layout,
                    cursor,
                    &clipped_viewport,
                );
            }
        }
    }

    fn mouse_interaction(
        &self,
        tree: &Tree,
        layout: Layout<'_>,
        cursor: mouse::Cursor,
        _viewport: &Rectangle,
        _renderer: &Renderer,
    ) -> mouse::Interaction {
        let state = tree.state.downcast_ref::<State>();

        if self.on_action.is_some() {
            if let Some(position) = cursor.position_in(layout.bounds()) {
                match state.region.hit(position) {
                    Some(Hit::Header(column)) if self.data.sort_request(column).is_some() => {
                        return mouse::Interaction::Pointer;
                    }
                    Some(Hit::Cell { .. }) => {
                        return mouse::Interaction::Pointer;
                    }
                    _ => {}
                }
            }
        }

        mouse::Interaction::default()
    }

    fn on_event(
        &mut self,
        tree: &mut Tree,
        event: iced::Event,
        layout: Layout<'_>,
        cursor: mouse::Cursor,
        renderer: &Renderer,
        clipboard: &mut dyn Clipboard,
        shell: &mut Shell<'_, Message>,
        viewport: &Rectangle,
    ) -> event::Status {
        let state = tree.state.downcast_mut::<State>();

        if let Some(on_action) = self.on_action.as_deref() {
            let update = Update::from_event(
                &event,
                state,
                layout.bounds(),
                cursor,
                self.key_binding.as_deref(),
            );

            match update {
                Some(Update::RedrawRequested) => {
                    if self.data.internal().is_dirty() {
                        self.data.internal().set_clean();
                        *state =
                            State::from_data(self.data, self.header_height, self.row_height);
                        shell.invalidate_layout();
                    }
                }
                Some(Update::Click(click)) => {
                    state.last_click = Some(click);

                    match click.kind() {
                        mouse::click::Kind::Single => match state.region.hit(click.position()) {
                            Some(Hit::Header(column)) => {
                                state.focus();
                                if let Some(request) = self.data.sort_request(column) {
                                    shell.publish(on_action(Action::Sort(request)));
                                }
                                return event::Status::Captured;
                            }
                            Some(Hit::Cell { row, column }) => {
                                state.focus();
                                shell.publish(on_action(Action::ToggleRow(row)));

                                if let Some(on_instruction) = self.on_instruction.as_deref() {
                                    if let Some(col) = self.data.columns().get(column) {
                                        shell.publish(on_instruction(Instruction::CellClicked(
                                            CellClick {
                                                key: col.key().to_owned(),
                                                column,
                                                row,
                                                value: self.data.cell(row, column),
                                            },
                                        )));
                                    }
                                }
                                return event::Status::Captured;
                            }
                            None => {}
                        },
                        mouse::click::Kind::Double | mouse::click::Kind::Triple => {
                            if let Some(Hit::Cell { row, .. }) =
                                state.region.hit(click.position())
                            {
                                if let Some(on_instruction) = self.on_instruction.as_deref() {
                                    shell.publish(on_instruction(Instruction::Activate(row)));
                                }
                            }
                            // fall through so cells see the double click
                        }
                    }
                }
                Some(Update::Binding(binding)) => match binding {
                    Binding::Focus => {
                        state.focus();
                        shell.invalidate_widgets();
                    }
                    Binding::Unfocus | Binding::ClickedOutside => {
                        state.unfocus();
                        shell.invalidate_widgets();
                    }
                    Binding::ToggleAll => {
                        if state.is_focused() {
                            shell.publish(on_action(Action::ToggleAll));
                            return event::Status::Captured;
                        }
                    }
                    Binding::MoveActive(motion) => {
                        if state.is_focused() {
                            shell.publish(on_action(Action::MoveActive(motion)));
                            return event::Status::Captured;
                        }
                    }
                    Binding::Toggle => {
                        if state.is_focused() {
                            if let Some(row) = self.data.active() {
                                shell.publish(on_action(Action::ToggleRow(row)));
                                return event::Status::Captured;
                            }
                        }
                    }
                    Binding::Activate => {
                        if state.is_focused() {
                            if let (Some(on_instruction), Some(row)) =
                                (self.on_instruction.as_deref(), self.data.active())
                            {
                                shell.publish(on_instruction(Instruction::Activate(row)));
                                return event::Status::Captured;
                            }
                        }
                    }
                    Binding::Custom(message) => {
                        shell.publish(message);
                        return event::Status::Captured;
                    }
                },
                None => {}
            }
        } else {
            log::trace!("table has no on_action handler; interaction is disabled");
        }

        let mut status = event::Status::Ignored;
        for ((child, tree), child_layout) in self
            .cells
            .iter_mut()
            .zip(tree.children.iter_mut())
            .zip(layout.children())
        {
            status = status.merge(child.as_widget_mut().on_event(
                tree,
                event.clone(),
                child_layout,
                cursor,
                renderer,
                clipboard,
                shell,
                viewport,
            ));
        }

        status
    }
}

#[derive(Debug)]
struct State {
    last_click: Option<mouse::Click>,
    is_focused: bool,

    region: Region,
}

#[derive(Debug)]
struct Region {
    row_count: usize,
    column_count: usize,
    raw_columns: Vec<f32>,
    scaled_columns: Vec<f32>,
    cumulative_x: Vec<f32>,
    header_height: f32,
    row_height: f32,
}

/// Where a point inside the table landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Hit {
    Header(usize),
    Cell { row: usize, column: usize },
}

impl Hit {
    fn row(self) -> Option<usize> {
        match self {
            Self::Header(_) => None,
            Self::Cell { row, .. } => Some(row),
        }
    }
}

impl Region {
    fn new(widths: Vec<f32>, row_count: usize, header_height: f32, row_height: f32) -> Self {
        let column_count = widths.len();

        Self {
            row_count,
            column_count,
            raw_columns: widths,
            scaled_columns: vec![0.0; column_count],
            cumulative_x: vec![0.0; column_count],
            header_height,
            row_height,
        }
    }

    fn total_raw_width(&self) -> f32 {
        self.raw_columns.iter().sum()
    }

    fn total_height(&self) -> f32 {
        self.header_height + self.row_count as f32 * self.row_height
    }

    fn scale_to_bounds(&mut self, bounds: Size) {
        let total = self.total_raw_width();

        if total <= f32::EPSILON {
            self.scaled_columns.fill(0.0);
            self.cumulative_x.fill(0.0);
            return;
        }

        for (scaled, raw) in self.scaled_columns.iter_mut().zip(self.raw_columns.iter()) {
            *scaled = raw / total * bounds.width;
        }

        let mut x = 0.0;
        for (i, width) in self.scaled_columns.iter().enumerate() {
            x += width;
            self.cumulative_x[i] = x;
        }
    }

    // Cell size; row 0 is the header
    fn cell_size(&self, row: usize, col: usize) -> Size {
        let width = self.scaled_columns.get(col).copied().unwrap_or(0.0);
        let height = if row == 0 {
            self.header_height
        } else {
            self.row_height
        };

        Size::new(width, height)
    }

    // Cell position; row 0 is the header
    fn cell_position(&self, row: usize, col: usize) -> Point {
        let x = if col == 0 {
            0.0
        } else {
            self.cumulative_x
                .get(col - 1)
                .copied()
                .unwrap_or(0.0)
        };
        let y = if row == 0 {
            0.0
        } else {
            self.header_height + (row - 1) as f32 * self.row_height
        };

        Point::new(x, y)
    }

    // Bounds of a body row, relative to the table origin
    fn row_bounds(&self, row: usize, width: f32) -> Rectangle {
        Rectangle {
            x: 0.0,
            y: self.header_height + row as f32 * self.row_height,
            width,
            height: self.row_height,
        }
    }

    // Find the cell under a point in widget-relative coordinates
    fn hit(&self, position: Point) -> Option<Hit> {
        let column = self.find_column(position.x)?;

        if position.y <= self.header_height {
            return Some(Hit::Header(column));
        }

        let row = ((position.y - self.header_height) / self.row_height) as usize;
        (row < self.row_count).then_some(Hit::Cell { row, column })
    }

    fn find_column(&self, x: f32) -> Option<usize> {
        if self.column_count == 0 {
            return None;
        }

        let index = match self.cumulative_x.binary_search_by(|cum| {
            cum.partial_cmp(&x).unwrap_or(std::cmp::Ordering::Equal)
        }) {
            Ok(index) => index,
            Err(index) => index,
        };

        Some(index.min(self.column_count - 1))
    }
}

impl State {
    fn from_data<Data, T>(data: &Data, header_height: f32, row_height: f32) -> Self
    where
        Data: RecordSource<T>,
    {
        let widths = data.columns().iter().map(Column::width).collect();

        Self {
            last_click: None,
            is_focused: false,
            region: Region::new(widths, data.row_count(), header_height, row_height),
        }
    }

    /// Returns whether the [`Table`] is currently focused or not.
    pub fn is_focused(&self) -> bool {
        self.is_focused
    }

    /// Focuses the [`Table`].
    pub fn focus(&mut self) {
        self.is_focused = true;
    }

    /// Unfocuses the [`Table`].
    pub fn unfocus(&mut self) {
        self.is_focused = false;
        self.last_click = None;
    }
}

impl<'a, Data, T, Message, Theme, Renderer>
    From<Table<'a, Data, T, Message, Theme, Renderer>>
    for Element<'a, Message, Theme, Renderer>
where
    Data: RecordSource<T>,
    T: 'a,
    Message: Clone + 'a,
    Theme: Catalog + 'a,
    Renderer: iced::advanced::text::Renderer + 'a,
{
    fn from(table: Table<'a, Data, T, Message, Theme, Renderer>) -> Self {
        Self::new(table)
    }
}
