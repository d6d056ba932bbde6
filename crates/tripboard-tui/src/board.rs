//! Turns the attached scene into styled lines: the sort bar, then the
//! list's rows and forms in mount order.

use ratatui::text::{Line, Span};
use strum::IntoEnumIterator;

use tripboard_core::{FormState, Mount, PointId, SortType};

use crate::form::Field;
use crate::format;
use crate::scene::{FormNode, ItemNode, Node, Scene};
use crate::theme;

/// Rendered board content.
#[derive(Debug, Default)]
pub struct BoardLines {
    pub sort: Option<SortType>,
    pub lines: Vec<Line<'static>>,
    /// First line of the open form, else of the focused row.
    pub focus_line: Option<usize>,
}

pub fn board_lines(scene: &Scene, focused: Option<&PointId>) -> BoardLines {
    let mut board = BoardLines::default();
    let mut form_line = None;
    let mut row_line = None;

    for &id in scene.children(Mount::Root) {
        match scene.node(id) {
            Some(Node::Sort(sort)) => board.sort = Some(*sort),
            Some(Node::List) => {
                for &child in scene.children(Mount::View(id)) {
                    let indent = " ".repeat(usize::from(scene.shake_offset(child)));
                    match scene.node(child) {
                        Some(Node::Loading) => {
                            board.lines.push(Line::styled("  Loading...", theme::muted()));
                        }
                        Some(Node::Empty(filter)) => {
                            board
                                .lines
                                .push(Line::styled(format!("  {}", filter.empty_message()), theme::muted()));
                        }
                        Some(Node::Item(item)) => {
                            let is_focused = focused == Some(&item.point.id);
                            if is_focused {
                                row_line = Some(board.lines.len());
                            }
                            board.lines.push(item_line(item, is_focused, &indent));
                        }
                        Some(Node::Form(form)) => {
                            form_line = form_line.or(Some(board.lines.len()));
                            board.lines.extend(form_lines(form, &indent));
                        }
                        Some(Node::Sort(_) | Node::List) | None => {}
                    }
                }
            }
            _ => {}
        }
    }

    board.focus_line = form_line.or(row_line);
    board
}

/// Sort columns with the active one highlighted and unsortable ones dimmed.
pub fn sort_bar(current: SortType) -> Line<'static> {
    let mut spans = vec![Span::styled(" Sort ", theme::muted())];
    for sort in SortType::iter() {
        let style = if sort == current {
            theme::tab_active()
        } else if sort.is_enabled() {
            theme::tab_inactive()
        } else {
            theme::tab_disabled()
        };
        spans.push(Span::styled(format!(" {} ", sort_label(sort)), style));
    }
    Line::from(spans)
}

fn sort_label(sort: SortType) -> &'static str {
    match sort {
        SortType::Day => "[d]ay",
        SortType::Event => "e[v]ent",
        SortType::Time => "[t]ime",
        SortType::Price => "[p]rice",
        SortType::Offers => "[o]ffers",
    }
}

fn item_line(item: &ItemNode, is_focused: bool, indent: &str) -> Line<'static> {
    let point = &item.point;
    let base = if is_focused {
        theme::selected()
    } else {
        theme::text()
    };
    let marker = if is_focused { "▶ " } else { "  " };

    let mut spans = vec![
        Span::styled(format!("{indent}{marker}"), base),
        Span::styled(format!("{}  ", format::day(point.date_from)), theme::muted()),
        Span::styled(format!("{:<12}", point.point_type.label()), theme::point_type(point.point_type)),
        Span::styled(
            format!("{:<16}", item.destination.as_deref().unwrap_or("—")),
            base,
        ),
        Span::styled(
            format!(
                "{} — {}  {:>11}  ",
                format::time(point.date_from),
                format::time(point.date_to),
                format::duration(point.duration())
            ),
            theme::text(),
        ),
        Span::styled(format!("€ {:<6}", point.base_price), theme::price()),
    ];
    for offer in &item.offers {
        spans.push(Span::styled(
            format!(" + {} €{}", offer.title, offer.price),
            theme::muted(),
        ));
    }
    if point.is_favorite {
        spans.push(Span::styled("  ★", theme::favorite()));
    }
    Line::from(spans)
}

fn form_lines(form: &FormNode, indent: &str) -> Vec<Line<'static>> {
    let draft = &form.draft;
    let point = &draft.point;
    let title = if draft.is_new { "New point" } else { "Edit point" };

    let mut lines = vec![Line::from(vec![
        Span::styled(format!("{indent}┌ {title}"), theme::title()),
        Span::styled(state_label(form.state), theme::muted()),
    ])];

    for field in Field::ALL {
        let value = match field {
            Field::Type => format!("‹ {} ›", point.point_type.label()),
            Field::Destination => format!(
                "‹ {} ›",
                draft.destination().map_or("choose", |d| d.name.as_str())
            ),
            Field::From => format::date_time(point.date_from),
            Field::To => format::date_time(point.date_to),
            Field::Price => format!("€ {}", point.base_price),
            Field::Offers => offers_value(form),
        };
        let style = if field == draft.field && !form.state.is_disabled {
            theme::selected()
        } else {
            theme::text()
        };
        lines.push(Line::from(vec![
            Span::styled(format!("{indent}│ {:<12}", field.label()), theme::muted()),
            Span::styled(value, style),
        ]));
    }

    if let Some(destination) = draft.destination() {
        if !destination.description.is_empty() {
            lines.push(Line::styled(
                format!("{indent}│ {}", destination.description),
                theme::muted(),
            ));
        }
        if !destination.pictures.is_empty() {
            lines.push(Line::styled(
                format!("{indent}│ {} photo(s)", destination.pictures.len()),
                theme::muted(),
            ));
        }
    }
    if let Some(error) = draft.error {
        lines.push(Line::styled(format!("{indent}│ {error}"), theme::error()));
    }

    let delete = if draft.is_new { "cancel" } else { "delete" };
    lines.push(Line::from(vec![
        Span::styled(format!("{indent}└ "), theme::muted()),
        Span::styled("Enter ", theme::key_hint_key()),
        Span::styled("save  ", theme::key_hint()),
        Span::styled("x ", theme::key_hint_key()),
        Span::styled(format!("{delete}  "), theme::key_hint()),
        Span::styled("r ", theme::key_hint_key()),
        Span::styled("roll up  ", theme::key_hint()),
        Span::styled("Tab ", theme::key_hint_key()),
        Span::styled("next field", theme::key_hint()),
    ]));
    lines
}

fn offers_value(form: &FormNode) -> String {
    let draft = &form.draft;
    let offers = draft.type_offers();
    if offers.is_empty() {
        return "none for this type".into();
    }
    offers
        .iter()
        .enumerate()
        .map(|(i, offer)| {
            let mark = if draft.is_offer_selected(offer) { "x" } else { " " };
            let cursor = if draft.field == Field::Offers && i == draft.offer_cursor {
                "›"
            } else {
                " "
            };
            format!("{cursor}[{mark}] {} +€{}", offer.title, offer.price)
        })
        .collect::<Vec<_>>()
        .join("  ")
}

fn state_label(state: FormState) -> &'static str {
    if state.is_saving {
        "  saving..."
    } else if state.is_deleting {
        "  deleting..."
    } else {
        ""
    }
}
