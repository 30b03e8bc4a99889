//! Draws the storefront from [`App`] state.
//!
//! Layout is a header bar, an optional nav strip, a two column body
//! (product list on the left, detail or bag panel on the right) and a
//! two line footer. Dialogs are drawn last, centered over everything.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap};

use crate::notifications::NotificationLevel;
use crate::state::{App, Modal};
use crate::theme::Palette;
use crate::views::{self, CartView, ProductView};

/// Render one frame.
pub fn render_view(f: &mut Frame, app: &App) {
    let palette = app.palette();

    let background = Block::default().style(Style::default().bg(palette.bg).fg(palette.text));
    f.render_widget(background, f.size());

    let nav_height = if app.nav_open { 1 } else { 0 };
    let [header_area, nav_area, body_area, footer_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(nav_height),
        Constraint::Min(0),
        Constraint::Length(2),
    ])
    .areas(f.size());

    render_header(f, app, palette, header_area);
    if app.nav_open {
        render_nav(f, app, palette, nav_area);
    }

    let [list_area, side_area] =
        Layout::horizontal([Constraint::Percentage(55), Constraint::Percentage(45)])
            .areas(body_area);

    render_products(f, app, palette, list_area);
    if app.cart_open {
        render_cart_panel(f, app, palette, side_area);
    } else {
        render_detail(f, app, palette, side_area);
    }

    render_footer(f, app, palette, footer_area);

    if let Some(modal) = &app.modal {
        render_modal(f, modal, palette, f.size());
    }
}

fn render_header(f: &mut Frame, app: &App, palette: Palette, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.border))
        .title(Span::styled(
            " Elegant Boutique ",
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD),
        ));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let count = app.cart.total_count();
    let bag_style = if count > 0 {
        Style::default()
            .fg(palette.accent)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(palette.text)
    };
    let line = Line::from(vec![
        Span::styled(format!("Bag ({count})"), bag_style),
        Span::styled(
            format!(
                " · [t] {} · [l] log in · [g] sign up · [?] help",
                app.theme.theme().toggle_label()
            ),
            Style::default().fg(palette.muted),
        ),
    ]);
    f.render_widget(Paragraph::new(line), inner);
}

fn render_nav(f: &mut Frame, app: &App, palette: Palette, area: Rect) {
    let mut spans = vec![Span::styled("Shop:", Style::default().fg(palette.muted))];
    for (index, filter) in boutique_core::CategoryFilter::all().iter().enumerate() {
        let style = if *filter == app.filter {
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(palette.text)
        };
        spans.push(Span::raw(" "));
        spans.push(Span::styled(
            format!("[{}] {}", index + 1, filter.label()),
            style,
        ));
    }
    spans.push(Span::styled(
        " · [w] newsletter",
        Style::default().fg(palette.muted),
    ));
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_products(f: &mut Frame, app: &App, palette: Palette, area: Rect) {
    let products = app.visible_products();
    let border = if app.cart_open {
        palette.border
    } else {
        palette.accent
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .title(format!(
            " Products · {} · {} ",
            app.filter.label(),
            app.sort.label()
        ));

    let items: Vec<ListItem> = products
        .iter()
        .map(|product| {
            let view = ProductView::from(*product);
            let mut spans = vec![
                Span::styled(view.title, Style::default().fg(palette.text)),
                Span::raw("  "),
                Span::styled(view.price, Style::default().fg(palette.accent)),
                Span::raw("  "),
                Span::styled(view.rating, Style::default().fg(palette.muted)),
            ];
            if app.is_flashed(&product.id) {
                spans.push(Span::styled(
                    "  Added ✓",
                    Style::default()
                        .fg(palette.success)
                        .add_modifier(Modifier::BOLD),
                ));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .bg(palette.selection_bg)
                .fg(palette.selection_fg)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    let mut state = ListState::default();
    if !products.is_empty() {
        state.select(Some(app.selected_product));
    }
    f.render_stateful_widget(list, area, &mut state);
}

fn render_detail(f: &mut Frame, app: &App, palette: Palette, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.border))
        .title(" Details ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let Some(product) = app
        .visible_products()
        .get(app.selected_product)
        .copied()
    else {
        return;
    };
    let view = ProductView::from(product);

    let lines = vec![
        Line::from(Span::styled(
            view.title,
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled(view.price, Style::default().fg(palette.text)),
            Span::raw("  "),
            Span::styled(view.rating, Style::default().fg(palette.muted)),
        ]),
        Line::from(Span::styled(view.category, Style::default().fg(palette.muted))),
        Line::default(),
        Line::from(Span::styled(view.description, Style::default().fg(palette.text))),
        Line::default(),
        Line::from(Span::styled(view.image, Style::default().fg(palette.muted))),
        Line::default(),
        Line::from(Span::styled(
            "[enter] add to bag · [a] choose quantity · [v] view",
            Style::default().fg(palette.muted),
        )),
    ];
    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}

fn render_cart_panel(f: &mut Frame, app: &App, palette: Palette, area: Rect) {
    let cart = CartView::from_store(&app.cart);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.accent))
        .title(format!(" Your Bag ({}) ", cart.count));
    let inner = block.inner(area);
    f.render_widget(block, area);

    if cart.lines.is_empty() {
        f.render_widget(
            Paragraph::new("Your cart is empty.").style(Style::default().fg(palette.muted)),
            inner,
        );
        return;
    }

    let [lines_area, summary_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(3)]).areas(inner);

    let items: Vec<ListItem> = cart
        .lines
        .iter()
        .map(|line| {
            ListItem::new(vec![
                Line::from(Span::styled(
                    line.title.clone(),
                    Style::default().fg(palette.text),
                )),
                Line::from(Span::styled(
                    format!("  {}", line.breakdown()),
                    Style::default().fg(palette.muted),
                )),
            ])
        })
        .collect();

    let list = List::new(items)
        .highlight_style(
            Style::default()
                .bg(palette.selection_bg)
                .fg(palette.selection_fg)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");
    let mut state = ListState::default();
    state.select(Some(app.selected_line));
    f.render_stateful_widget(list, lines_area, &mut state);

    let summary = vec![
        Line::default(),
        Line::from(Span::styled(
            format!("Total: {}", cart.total),
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "[+/-] quantity · [d] remove · [x] clear · [o] checkout",
            Style::default().fg(palette.muted),
        )),
    ];
    f.render_widget(Paragraph::new(summary), summary_area);
}

fn render_footer(f: &mut Frame, app: &App, palette: Palette, area: Rect) {
    let hints = if app.modal.is_some() {
        "[enter] confirm · [esc] close"
    } else if app.cart_open {
        "[↑/↓] select line · [+/-] quantity · [d] remove · [o] checkout · [esc] close"
    } else {
        "[↑/↓] browse · [enter] add to bag · [c] bag · [f] filter · [s] sort · [q] quit"
    };

    let status = app.latest_notification().map_or_else(
        || {
            Line::from(Span::styled(
                format!("© {} Elegant Boutique", views::current_year()),
                Style::default().fg(palette.muted),
            ))
        },
        |notification| {
            Line::from(Span::styled(
                notification.message.clone(),
                Style::default()
                    .fg(level_color(notification.level, palette))
                    .add_modifier(Modifier::BOLD),
            ))
        },
    );

    let lines = vec![
        Line::from(Span::styled(hints, Style::default().fg(palette.muted))),
        status,
    ];
    f.render_widget(Paragraph::new(lines), area);
}

fn render_modal(f: &mut Frame, modal: &Modal, palette: Palette, full: Rect) {
    let area = match modal {
        Modal::Help => centered_rect(70, 60, full),
        _ => centered_rect(60, 30, full),
    };

    f.render_widget(Clear, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.accent))
        .style(Style::default().bg(palette.panel).fg(palette.text))
        .title(format!(" {} ", modal.title()));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let muted = Style::default().fg(palette.muted);
    let lines = match modal {
        Modal::Help => vec![
            Line::from("enter    add selected product to bag"),
            Line::from("a        choose a quantity"),
            Line::from("v        view product (demo)"),
            Line::from("c        open or close the bag"),
            Line::from("f / s    cycle category filter / sort order"),
            Line::from("1-4      jump to a category"),
            Line::from("+ - d    adjust or remove a bag line"),
            Line::from("x / o    clear bag / checkout"),
            Line::from("t        switch light and dark theme"),
            Line::from("n        toggle the nav strip"),
            Line::from("l g w    log in · sign up · newsletter (demo)"),
            Line::from("q        quit"),
        ],
        Modal::Notice { message } => vec![
            Line::from(message.clone()),
            Line::default(),
            Line::from(Span::styled("[enter] ok", muted)),
        ],
        Modal::Quantity { title, input, .. } => vec![
            Line::from(format!("Quantity for {title}:")),
            input_line(input, palette),
            Line::from(Span::styled("Blank adds 1.", muted)),
            Line::from(Span::styled("[enter] add · [esc] cancel", muted)),
        ],
        Modal::Login { email } => vec![
            Line::from("Email:"),
            input_line(email, palette),
            Line::from(Span::styled("Demo only, any input is accepted.", muted)),
            Line::from(Span::styled(
                "[enter] log in · [tab] create an account · [esc] cancel",
                muted,
            )),
        ],
        Modal::Signup { email } | Modal::Newsletter { email } => vec![
            Line::from("Email:"),
            input_line(email, palette),
            Line::from(Span::styled("Demo only, any input is accepted.", muted)),
            Line::from(Span::styled("[enter] submit · [esc] cancel", muted)),
        ],
    };
    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}

fn input_line(input: &str, palette: Palette) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("> {input}"), Style::default().fg(palette.text)),
        Span::styled("█", Style::default().fg(palette.accent)),
    ])
}

const fn level_color(level: NotificationLevel, palette: Palette) -> Color {
    match level {
        NotificationLevel::Info => palette.text,
        NotificationLevel::Warning => palette.warning,
        NotificationLevel::Error => palette.error,
        NotificationLevel::Success => palette.success,
    }
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let [_, middle, _] = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .areas(area);
    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .areas(middle);
    center
}
