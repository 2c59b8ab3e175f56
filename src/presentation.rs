//! Presentation tree for an open dialog
//!
//! [`Presentation::build`] turns a [`DialogConfig`] into a small element
//! tree (container, content wrapper, title, content, footer and controls).
//! Every element carries the structural class names listed in [`class`];
//! those names are a stable contract with anything that styles or inspects
//! the tree. Click handling is wired onto the elements themselves: the
//! controls and the overlay background each close the dialog with their
//! own reason.

use crate::config::{DialogConfig, Mode};
use crate::layout::calculate_dialog_layout;
use crate::outcome::CloseReason;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Structural class names
pub mod class {
    pub const CONTAINER: &str = "simple-modal-dialog-container";
    pub const CONTAINER_TRANSITION: &str = "simple-modal-dialog-container_transition";
    /// Present while entering and while exiting
    pub const TRANSITION_START: &str = "transition_start";
    pub const CONTENT_WRAPPER: &str = "simple-modal-dialog-content-wrapper";
    pub const TITLE: &str = "simple-modal-dialog-title";
    pub const CONTENT: &str = "simple-modal-dialog-content";
    pub const FOOTER: &str = "simple-modal-dialog-footer";
    pub const FOOTER_BUTTON: &str = "simple-modal-dialog-footer-button";
    pub const FOOTER_BUTTON_CANCEL: &str = "simple-modal-dialog-footer-button_cancel";
    pub const FOOTER_BUTTON_OK: &str = "simple-modal-dialog-footer-button_ok";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    Container,
    ContentWrapper,
    Title,
    Content,
    Footer,
    CancelButton,
    ConfirmButton,
}

/// Whether a click should continue to document-level handlers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Propagation {
    Stopped,
    Continue,
}

/// Result of routing one click through the tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dispatch {
    pub target: Option<ElementKind>,
    pub reason: Option<CloseReason>,
    pub propagation: Propagation,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    kind: ElementKind,
    classes: Vec<&'static str>,
    text: String,
    /// Reason to close with when this element is the click target
    on_click: Option<CloseReason>,
    area: Rect,
    children: Vec<Element>,
}

impl Element {
    fn new(kind: ElementKind, classes: &[&'static str]) -> Self {
        Self {
            kind,
            classes: classes.to_vec(),
            text: String::new(),
            on_click: None,
            area: Rect::default(),
            children: Vec::new(),
        }
    }

    fn with_text(mut self, text: &str) -> Self {
        self.text = text.to_string();
        self
    }

    fn on_click(mut self, reason: CloseReason) -> Self {
        self.on_click = Some(reason);
        self
    }

    pub fn kind(&self) -> ElementKind {
        self.kind
    }

    pub fn classes(&self) -> &[&'static str] {
        &self.classes
    }

    pub fn has_class(&self, name: &str) -> bool {
        self.classes.iter().any(|c| *c == name)
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn click_reason(&self) -> Option<&CloseReason> {
        self.on_click.as_ref()
    }

    /// Area from the most recent layout; empty before the first one
    pub fn area(&self) -> Rect {
        self.area
    }

    pub fn children(&self) -> &[Element] {
        &self.children
    }

    fn find(&self, kind: ElementKind) -> Option<&Element> {
        if self.kind == kind {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(kind))
    }

    fn find_mut(&mut self, kind: ElementKind) -> Option<&mut Element> {
        if self.kind == kind {
            return Some(self);
        }
        self.children.iter_mut().find_map(|child| child.find_mut(kind))
    }

    /// Innermost element under the given cell
    fn target_at(&self, column: u16, row: u16) -> Option<&Element> {
        if !contains(self.area, column, row) {
            return None;
        }
        self.children
            .iter()
            .find_map(|child| child.target_at(column, row))
            .or(Some(self))
    }
}

fn contains(area: Rect, column: u16, row: u16) -> bool {
    column >= area.x
        && column < area.x.saturating_add(area.width)
        && row >= area.y
        && row < area.y.saturating_add(area.height)
}

/// The live visual tree of one dialog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Presentation {
    root: Element,
    painted: bool,
}

impl Presentation {
    pub fn build(config: &DialogConfig) -> Self {
        let mut container = Element::new(ElementKind::Container, &[class::CONTAINER])
            .on_click(CloseReason::OverlayDismissed);
        if config.animated() {
            container.classes.push(class::CONTAINER_TRANSITION);
            container.classes.push(class::TRANSITION_START);
        }

        let mut wrapper = Element::new(ElementKind::ContentWrapper, &[class::CONTENT_WRAPPER]);
        if !config.title().is_empty() {
            wrapper
                .children
                .push(Element::new(ElementKind::Title, &[class::TITLE]).with_text(config.title()));
        }
        wrapper.children.push(
            Element::new(ElementKind::Content, &[class::CONTENT]).with_text(config.content()),
        );

        let mut footer = Element::new(ElementKind::Footer, &[class::FOOTER]);
        if config.mode() == Mode::Confirm {
            footer.children.push(
                Element::new(
                    ElementKind::CancelButton,
                    &[class::FOOTER_BUTTON, class::FOOTER_BUTTON_CANCEL],
                )
                .with_text(config.cancel_text())
                .on_click(CloseReason::Cancelled {
                    label: config.cancel_text().to_string(),
                }),
            );
        }
        footer.children.push(
            Element::new(
                ElementKind::ConfirmButton,
                &[class::FOOTER_BUTTON, class::FOOTER_BUTTON_OK],
            )
            .with_text(config.confirm_text())
            .on_click(CloseReason::Confirmed {
                label: config.confirm_text().to_string(),
            }),
        );

        wrapper.children.push(footer);
        container.children.push(wrapper);

        Self {
            root: container,
            painted: false,
        }
    }

    /// The container element
    pub fn root(&self) -> &Element {
        &self.root
    }

    pub fn find(&self, kind: ElementKind) -> Option<&Element> {
        self.root.find(kind)
    }

    /// Whether the tree has been drawn at least once
    pub fn painted(&self) -> bool {
        self.painted
    }

    pub fn container_has_class(&self, name: &str) -> bool {
        self.root.has_class(name)
    }

    pub(crate) fn add_container_class(&mut self, name: &'static str) {
        if !self.root.has_class(name) {
            self.root.classes.push(name);
        }
    }

    pub(crate) fn remove_container_class(&mut self, name: &str) {
        self.root.classes.retain(|c| *c != name);
    }

    /// Assign an area to every element for a screen of size `area`
    pub fn layout(&mut self, area: Rect) {
        let title = self.find(ElementKind::Title).map(|e| e.text.clone());
        let content = self
            .find(ElementKind::Content)
            .map(|e| e.text.clone())
            .unwrap_or_default();
        let labels: Vec<String> = self
            .find(ElementKind::Footer)
            .map(|footer| footer.children.iter().map(|b| b.text.clone()).collect())
            .unwrap_or_default();
        let labels: Vec<&str> = labels.iter().map(String::as_str).collect();

        let layout = calculate_dialog_layout(area, title.as_deref(), &content, &labels);

        self.root.area = layout.container;
        if let Some(wrapper) = self.root.find_mut(ElementKind::ContentWrapper) {
            wrapper.area = layout.wrapper;
        }
        if let (Some(title), Some(area)) = (self.root.find_mut(ElementKind::Title), layout.title) {
            title.area = area;
        }
        if let Some(content) = self.root.find_mut(ElementKind::Content) {
            content.area = layout.content;
        }
        if let Some(footer) = self.root.find_mut(ElementKind::Footer) {
            footer.area = layout.footer;
            for (button, area) in footer.children.iter_mut().zip(layout.buttons) {
                button.area = area;
            }
        }
    }

    /// Route a click at the given cell.
    ///
    /// Only the innermost element under the cell reacts. A control or the
    /// bare overlay closes the dialog and stops propagation; anything inside
    /// the content wrapper lets the click through untouched.
    pub fn dispatch_click(&self, column: u16, row: u16) -> Dispatch {
        let target = self.root.target_at(column, row);
        let reason = target.and_then(|element| element.on_click.clone());
        let propagation = if reason.is_some() {
            Propagation::Stopped
        } else {
            Propagation::Continue
        };

        Dispatch {
            target: target.map(Element::kind),
            reason,
            propagation,
        }
    }

    /// Lay out and draw the dialog over whatever is already in the frame
    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        self.layout(area);

        let transitioning = self.root.has_class(class::TRANSITION_START);
        let muted = Style::default().fg(Color::DarkGray);

        frame
            .buffer_mut()
            .set_style(self.root.area, Style::default().add_modifier(Modifier::DIM));

        if let Some(wrapper) = self.root.find(ElementKind::ContentWrapper) {
            frame.render_widget(Clear, wrapper.area);
            frame.render_widget(
                Block::default().borders(Borders::ALL).border_style(if transitioning {
                    muted
                } else {
                    Style::default().fg(Color::Yellow)
                }),
                wrapper.area,
            );

            for element in &wrapper.children {
                match element.kind {
                    ElementKind::Title => {
                        let style = if transitioning {
                            muted
                        } else {
                            Style::default()
                                .fg(Color::Yellow)
                                .add_modifier(Modifier::BOLD)
                        };
                        frame.render_widget(
                            Paragraph::new(Line::from(Span::styled(element.text.as_str(), style)))
                                .alignment(Alignment::Center),
                            element.area,
                        );
                    }
                    ElementKind::Content => {
                        let style = if transitioning {
                            muted
                        } else {
                            Style::default().fg(Color::White)
                        };
                        frame.render_widget(
                            Paragraph::new(element.text.as_str())
                                .style(style)
                                .wrap(Wrap { trim: false }),
                            element.area,
                        );
                    }
                    ElementKind::Footer => {
                        for button in &element.children {
                            frame.render_widget(
                                Paragraph::new(Span::styled(
                                    format!("[ {} ]", button.text),
                                    button_style(button.kind, transitioning),
                                )),
                                button.area,
                            );
                        }
                    }
                    _ => {}
                }
            }
        }

        self.painted = true;
    }
}

fn button_style(kind: ElementKind, transitioning: bool) -> Style {
    if transitioning {
        return Style::default().fg(Color::DarkGray);
    }
    let color = match kind {
        ElementKind::CancelButton => Color::Red,
        _ => Color::Green,
    };
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DialogOptions;
    use ratatui::{backend::TestBackend, Terminal};

    fn build(options: DialogOptions) -> Presentation {
        Presentation::build(&DialogConfig::from_options(options).unwrap())
    }

    fn screen() -> Rect {
        Rect::new(0, 0, 80, 24)
    }

    #[test]
    fn test_confirm_tree_structure() {
        let presentation = build(DialogOptions::confirm("Proceed?"));
        let root = presentation.root();

        assert_eq!(root.kind(), ElementKind::Container);
        assert_eq!(root.classes(), &[class::CONTAINER]);

        let wrapper = &root.children()[0];
        assert!(wrapper.has_class(class::CONTENT_WRAPPER));
        let kinds: Vec<ElementKind> = wrapper.children().iter().map(Element::kind).collect();
        assert_eq!(
            kinds,
            vec![ElementKind::Title, ElementKind::Content, ElementKind::Footer]
        );

        let footer = presentation.find(ElementKind::Footer).unwrap();
        let cancel = &footer.children()[0];
        let ok = &footer.children()[1];
        assert_eq!(cancel.text(), "cancel");
        assert!(cancel.has_class(class::FOOTER_BUTTON));
        assert!(cancel.has_class(class::FOOTER_BUTTON_CANCEL));
        assert_eq!(ok.text(), "ok");
        assert!(ok.has_class(class::FOOTER_BUTTON_OK));
        assert_eq!(
            ok.click_reason(),
            Some(&CloseReason::Confirmed {
                label: "ok".to_string()
            })
        );
    }

    #[test]
    fn test_alert_has_no_cancel_control() {
        let presentation = build(DialogOptions::alert("Saved."));
        assert!(presentation.find(ElementKind::CancelButton).is_none());

        let footer = presentation.find(ElementKind::Footer).unwrap();
        assert_eq!(footer.children().len(), 1);
        assert_eq!(footer.children()[0].text(), "close");
    }

    #[test]
    fn test_empty_title_skips_title_region() {
        let presentation = build(DialogOptions::alert("Saved.").title(""));
        assert!(presentation.find(ElementKind::Title).is_none());
    }

    #[test]
    fn test_animated_container_starts_in_entering_state() {
        let presentation = build(DialogOptions::alert("x").animated(true));
        assert!(presentation.container_has_class(class::CONTAINER_TRANSITION));
        assert!(presentation.container_has_class(class::TRANSITION_START));

        let still = build(DialogOptions::alert("x"));
        assert!(!still.container_has_class(class::TRANSITION_START));
    }

    #[test]
    fn test_clicks_before_layout_fall_through() {
        let presentation = build(DialogOptions::alert("x"));
        let dispatch = presentation.dispatch_click(0, 0);
        assert_eq!(dispatch.target, None);
        assert_eq!(dispatch.propagation, Propagation::Continue);
    }

    #[test]
    fn test_background_click_dismisses() {
        let mut presentation = build(DialogOptions::confirm("Proceed?"));
        presentation.layout(screen());

        let dispatch = presentation.dispatch_click(0, 0);
        assert_eq!(dispatch.target, Some(ElementKind::Container));
        assert_eq!(dispatch.reason, Some(CloseReason::OverlayDismissed));
        assert_eq!(dispatch.propagation, Propagation::Stopped);
    }

    #[test]
    fn test_click_inside_wrapper_does_not_close() {
        let mut presentation = build(DialogOptions::confirm("Proceed?"));
        presentation.layout(screen());

        let content = presentation.find(ElementKind::Content).unwrap().area();
        let dispatch = presentation.dispatch_click(content.x, content.y);
        assert_eq!(dispatch.target, Some(ElementKind::Content));
        assert_eq!(dispatch.reason, None);
        assert_eq!(dispatch.propagation, Propagation::Continue);

        // the wrapper border belongs to the wrapper, not the overlay
        let wrapper = presentation.find(ElementKind::ContentWrapper).unwrap().area();
        let dispatch = presentation.dispatch_click(wrapper.x, wrapper.y);
        assert_eq!(dispatch.target, Some(ElementKind::ContentWrapper));
        assert_eq!(dispatch.reason, None);
    }

    #[test]
    fn test_control_clicks_carry_labels() {
        let mut presentation = build(
            DialogOptions::confirm("Delete?")
                .confirm_text("delete")
                .cancel_text("keep"),
        );
        presentation.layout(screen());

        let cancel = presentation.find(ElementKind::CancelButton).unwrap().area();
        let dispatch = presentation.dispatch_click(cancel.x, cancel.y);
        assert_eq!(
            dispatch.reason,
            Some(CloseReason::Cancelled {
                label: "keep".to_string()
            })
        );
        assert_eq!(dispatch.propagation, Propagation::Stopped);

        let ok = presentation.find(ElementKind::ConfirmButton).unwrap().area();
        let dispatch = presentation.dispatch_click(ok.x + ok.width - 1, ok.y);
        assert_eq!(
            dispatch.reason,
            Some(CloseReason::Confirmed {
                label: "delete".to_string()
            })
        );
    }

    #[test]
    fn test_render_draws_regions() {
        let mut presentation = build(DialogOptions::confirm("Proceed?").title("Careful"));
        let mut terminal = Terminal::new(TestBackend::new(60, 16)).unwrap();

        assert!(!presentation.painted());
        terminal
            .draw(|frame| presentation.render(frame, frame.area()))
            .unwrap();
        assert!(presentation.painted());

        let rendered: String = terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(rendered.contains("Careful"));
        assert!(rendered.contains("Proceed?"));
        assert!(rendered.contains("[ cancel ]"));
        assert!(rendered.contains("[ ok ]"));
    }
}
