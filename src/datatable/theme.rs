use iced::{Background, Border, Color, Theme};

use super::Status;

/// The appearance of a [`Table`](crate::Table).
#[derive(Debug, Clone, Copy)]
pub struct Style {
    /// The default [`Background`] of the table.
    pub background: Background,
    /// The [`Border`] of the table.
    pub border: Border,
    /// The gridlines border.
    pub gridlines: Border,
    /// The fill of the header row.
    pub header: Background,
    /// The fill of every other body row.
    pub stripe: Background,
    /// The color of the overlay when hovering a row.
    pub hovered: Color,
    /// The style of selected rows.
    pub selection: SelectionStyle,
}

#[derive(Debug, Clone, Copy)]
/// The appearance of selected and active rows in a [`Table`](crate::Table).
pub struct SelectionStyle {
    /// The fill of a selected row.
    pub fill: Color,
    /// The stroke around the active row.
    pub stroke: Color,
    /// The width of the stroke.
    pub stroke_width: f32,
}

/// A styling function for a [`Table`](crate::Table).
pub type StyleFn<'a, Theme> = Box<dyn Fn(&Theme, Status) -> Style + 'a>;

impl Catalog for Theme {
    type Class<'a> = StyleFn<'a, Self>;

    fn default<'a>() -> <Theme as Catalog>::Class<'a> {
        Box::new(default)
    }

    fn style(&self, class: &<Theme as Catalog>::Class<'_>, status: Status) -> Style {
        class(self, status)
    }
}

/// The default style of a [`Table`](crate::Table).
pub fn default(theme: &iced::Theme, status: Status) -> Style {
    let palette = theme.extended_palette();

    let base = Style {
        background: Color::TRANSPARENT.into(),
        border: Border {
            radius: 0.0.into(),
            width: 1.0,
            color: palette.background.strong.color,
        },
        gridlines: Border {
            radius: 0.0.into(),
            width: 1.0,
            color: palette.background.strong.color.scale_alpha(0.5),
        },
        header: palette.background.weak.color.into(),
        stripe: palette.background.weak.color.scale_alpha(0.3).into(),
        hovered: palette.primary.weak.color.scale_alpha(0.2),
        selection: SelectionStyle {
            fill: palette.primary.weak.color.scale_alpha(0.2),
            stroke: palette.primary.weak.color.scale_alpha(0.5),
            stroke_width: 1.0,
        },
    };

    match status {
        Status::Focused => Style {
            selection: SelectionStyle {
                fill: palette.primary.base.color.scale_alpha(0.2),
                stroke: palette.primary.base.color,
                stroke_width: 1.0,
            },
            ..base
        },
        Status::Unfocused => Style {
            selection: SelectionStyle {
                fill: base.selection.fill.scale_alpha(0.5),
                stroke: base.selection.stroke.scale_alpha(0.5),
                ..base.selection
            },
            ..base
        },
        Status::Disabled => Style {
            hovered: Color::TRANSPARENT,
            ..base
        },
    }
}

/// The theme catalog of a [`Table`](crate::Table).
pub trait Catalog: iced::widget::text::Catalog {
    /// The item class of the [`Catalog`].
    type Class<'a>;

    /// The default class produced by the [`Catalog`].
    fn default<'a>() -> <Self as Catalog>::Class<'a>;

    /// The [`Style`] of a class with the given status.
    fn style(&self, class: &<Self as Catalog>::Class<'_>, status: Status) -> Style;
}
