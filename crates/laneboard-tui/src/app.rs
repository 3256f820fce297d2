//! Application state and update logic for the laneboard TUI.

use std::cell::RefCell;
use std::rc::Rc;

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;

use laneboard_core::{
    ActionGroupTemplate, BasicViewFactory, Dataset, GroupTemplate, HostError, TimelineHost,
    ViewFactory,
};

use crate::board::{BoardEngine, SCROLL_SPEED};
use crate::event::Action;
use crate::theme::{BorderSet, IconMode, IconSet, Theme};

/// Startup configuration for the TUI.
#[derive(Debug, Clone)]
pub struct UiConfig {
    /// Color palette.
    pub theme: Theme,
    /// Icon/border mode.
    pub icon_mode: IconMode,
    /// Start with the custom group template installed.
    pub with_template: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            icon_mode: IconMode::default(),
            with_template: true,
        }
    }
}

/// TUI application state.
pub struct App {
    /// Host component wrapping the board engine.
    pub host: TimelineHost<BoardEngine>,
    /// Color palette.
    pub theme: Theme,
    /// Border set.
    pub borders: BorderSet,
    /// Icon set.
    pub icons: IconSet,
    /// Whether the custom group template is installed.
    pub template_enabled: bool,
    /// Whether the app should exit.
    pub should_quit: bool,
    /// Board inner area from the last draw, for mouse mapping.
    pub board_inner: Option<Rect>,
}

impl App {
    /// Create the app and mount the widget with the dataset.
    pub fn new(dataset: Dataset, config: UiConfig) -> Result<Self, HostError> {
        let factory: Rc<RefCell<dyn ViewFactory>> =
            Rc::new(RefCell::new(BasicViewFactory::new()));
        let mut host = TimelineHost::new(BoardEngine::new(), factory);

        host.set_options(dataset.options);
        host.set_items(dataset.items);
        host.set_groups(dataset.groups);
        if config.with_template {
            host.set_group_template(Some(Rc::new(ActionGroupTemplate) as Rc<dyn GroupTemplate>));
        }
        host.mount()?;

        Ok(Self {
            host,
            theme: config.theme,
            borders: BorderSet::new(config.icon_mode),
            icons: IconSet::new(config.icon_mode),
            template_enabled: config.with_template,
            should_quit: false,
            board_inner: None,
        })
    }

    /// Apply a key action.
    pub fn handle_action(&mut self, action: Action) {
        match action {
            Action::Quit => self.should_quit = true,
            Action::Up => {
                self.host.engine_mut().state_mut().select_prev();
                self.ensure_selection_visible();
            }
            Action::Down => {
                self.host.engine_mut().state_mut().select_next();
                self.ensure_selection_visible();
            }
            Action::Select => {
                self.host.engine_mut().state_mut().toggle_selected();
            }
            Action::ToggleTemplate => {
                self.template_enabled = !self.template_enabled;
                let template = self
                    .template_enabled
                    .then(|| Rc::new(ActionGroupTemplate) as Rc<dyn GroupTemplate>);
                self.host.set_group_template(template);
            }
            Action::None => {}
        }
    }

    /// Apply a mouse event.
    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::ScrollUp => {
                self.host.engine_mut().state_mut().scroll_up(SCROLL_SPEED);
            }
            MouseEventKind::ScrollDown => {
                self.host.engine_mut().state_mut().scroll_down(SCROLL_SPEED);
            }
            MouseEventKind::Down(MouseButton::Left) => {
                self.handle_click(mouse.column, mouse.row);
            }
            _ => {}
        }
    }

    /// Route a click at terminal coordinates into the board.
    fn handle_click(&mut self, column: u16, row: u16) {
        let Some(inner) = self.board_inner else {
            return;
        };
        if column < inner.x
            || column >= inner.x + inner.width
            || row < inner.y
            || row >= inner.y + inner.height
        {
            return;
        }

        let Self {
            host,
            theme,
            icons,
            ..
        } = self;
        host.engine_mut()
            .handle_click(column - inner.x, row - inner.y, theme, icons);
    }

    fn ensure_selection_visible(&mut self) {
        if let Some(inner) = self.board_inner {
            let state = self.host.engine_mut().state_mut();
            let count = state.rows_per_page(inner.height as usize);
            state.ensure_selection_visible(count);
        }
    }
}
