use ratatui::layout::Rect;

use crate::config::Config;
use crate::event::ChannelMessage;
use crate::focus::deferred::DeferredFocus;
use crate::focus::traversal::{FocusRing, FocusTarget};
use crate::focus::tray::{InputSource, TrayController};
use crate::model::course::{CourseStore, Sequence, Unit};
use crate::nav::controller::{self, NavAction, NavPlan};
use crate::nav::fit::{self, LayoutFit, ResizeSettler};
use crate::store::kv::KeyValue;
use crate::store::prefs;
use crate::ui::components::nav_strip;
use crate::ui::layout::{ScreenLayout, ViewMode};
use crate::ui::theme::Theme;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppScreen {
    Course,
    CourseExit,
}

pub struct App {
    pub screen: AppScreen,
    pub store: CourseStore,
    pub sequence_id: String,
    pub unit_id: Option<String>,
    pub fit: LayoutFit,
    pub view: ViewMode,
    pub settler: ResizeSettler,
    pub focus: FocusRing,
    pub deferred: DeferredFocus,
    pub tray: TrayController,
    pub session: Box<dyn KeyValue>,
    pub durable: Box<dyn KeyValue>,
    pub dropdown_open: bool,
    pub theme: &'static Theme,
    pub config: Config,
    pub should_quit: bool,
    last_size: Option<(u16, u16)>,
}

impl App {
    pub fn new(
        store: CourseStore,
        config: Config,
        session: Box<dyn KeyValue>,
        durable: Box<dyn KeyValue>,
    ) -> Self {
        let loaded_theme = Theme::load(&config.theme).unwrap_or_default();
        let theme: &'static Theme = Box::leak(Box::new(loaded_theme));

        let sequence_id = store.first_sequence_id().to_string();
        let unit_id = store
            .get_sequence(&sequence_id)
            .and_then(|seq| seq.unit_ids.first().cloned());
        let tray = TrayController::load(store.course_id(), &*session);

        let mut app = Self {
            screen: AppScreen::Course,
            store,
            sequence_id,
            unit_id,
            fit: LayoutFit::Pending,
            view: ViewMode::Wide,
            settler: ResizeSettler::default(),
            focus: FocusRing::default(),
            deferred: DeferredFocus::new(),
            tray,
            session,
            durable,
            dropdown_open: false,
            theme,
            config,
            should_quit: false,
            last_size: None,
        };
        app.rebuild_focus();
        // A keyboard-initiated open persisted before a reload lands focus on
        // the tray's close control once the tray is back.
        if app.tray_visible() && app.tray.take_focus_pending() {
            app.focus.focus(FocusTarget::TrayClose);
        }
        app
    }

    pub fn plan(&self) -> NavPlan {
        controller::plan(
            &self.store,
            &self.sequence_id,
            self.unit_id.as_deref(),
            self.fit,
            self.view,
            self.config.rtl,
        )
    }

    pub fn current_sequence(&self) -> Option<&Sequence> {
        self.store.get_sequence(&self.sequence_id)
    }

    pub fn current_unit(&self) -> Option<&Unit> {
        self.unit_id
            .as_deref()
            .and_then(|id| self.store.get_unit(id))
    }

    pub fn show_sidebar(&self) -> bool {
        prefs::show_discussion_sidebar(&*self.durable)
    }

    pub fn has_banner(&self) -> bool {
        self.current_sequence()
            .is_some_and(|s| s.banner_text.is_some())
    }

    /// The tray is on screen only when it is open AND the sidebar preference
    /// allows it. Focusable elements must match what is rendered, so the
    /// focus ring and the Tab trap key off this, never off the open state
    /// alone.
    pub fn tray_visible(&self) -> bool {
        self.tray.is_open() && self.show_sidebar()
    }

    fn rebuild_focus(&mut self) {
        let plan = self.plan();
        self.focus
            .rebuild(&plan, self.dropdown_open, self.tray_visible());
    }

    /// Resize events stream through the settler; a size is applied only
    /// once the stream has been quiet for a couple of ticks.
    pub fn on_resize(&mut self, width: u16, height: u16) {
        self.settler.observe_resize(width, height);
    }

    pub fn on_tick(&mut self) {
        if let Some((width, height)) = self.settler.on_tick() {
            self.apply_size(width, height);
        }
    }

    /// Commit a stable terminal size: recompute the view mode and re-measure
    /// the strip. Idempotent; re-applying the same size changes nothing.
    pub fn apply_size(&mut self, width: u16, height: u16) {
        self.last_size = Some((width, height));
        self.view = ViewMode::from_width(width, self.config.width_breakpoint);
        self.remeasure();
    }

    fn remeasure(&mut self) {
        let Some((width, height)) = self.last_size else {
            // No size yet; the ring still has to track state changes.
            self.rebuild_focus();
            return;
        };
        let layout = ScreenLayout::new(
            Rect::new(0, 0, width, height),
            self.config.width_breakpoint,
            self.has_banner(),
            self.tray_visible(),
        );
        // Measure against the optimistic tab items so Pending and Collapsed
        // states re-resolve from the same inputs.
        let optimistic = controller::plan(
            &self.store,
            &self.sequence_id,
            self.unit_id.as_deref(),
            LayoutFit::Pending,
            self.view,
            self.config.rtl,
        );
        let strip_width = layout.strip.width.saturating_sub(2);
        let widths = nav_strip::tab_widths(optimistic.mode.items());
        let fixed = nav_strip::fixed_width(&optimistic);
        let new_fit = fit::compute_fit(strip_width, &widths, fixed);
        if new_fit != self.fit {
            self.fit = new_fit;
            if !self.fit.is_collapsed() {
                self.dropdown_open = false;
            }
        }
        self.rebuild_focus();
    }

    /// Per-render-frame bookkeeping: advance the deferred focus hops.
    pub fn on_frame(&mut self) {
        let target = {
            let focus = &self.focus;
            self.deferred.on_frame(|t| focus.contains(t))
        };
        if let Some(target) = target {
            self.focus.focus(target);
        }
    }

    pub fn arrow(&mut self, forward: bool) {
        self.focus.arrow(forward);
    }

    pub fn tab_key(&mut self, forward: bool) {
        self.focus.tab(forward, self.tray_visible());
    }

    /// Activate whatever currently has focus.
    pub fn activate_focused(&mut self, source: InputSource) {
        let plan = self.plan();
        match self.focus.current() {
            Some(FocusTarget::Previous) if plan.previous.enabled => {
                self.apply_action(plan.previous.action.clone());
            }
            Some(FocusTarget::Next) if plan.next.enabled => {
                self.apply_action(plan.next.action.clone());
            }
            Some(FocusTarget::Tab(idx)) => {
                if let Some(item) = plan.mode.items().get(idx) {
                    self.navigate_to_unit(item.unit_id.clone());
                }
            }
            Some(FocusTarget::DropdownToggle) => {
                self.dropdown_open = !self.dropdown_open;
                self.rebuild_focus();
            }
            Some(FocusTarget::DropdownItem(idx)) => {
                if let Some(item) = plan.mode.items().get(idx) {
                    self.navigate_to_unit(item.unit_id.clone());
                }
                self.dropdown_open = false;
                self.rebuild_focus();
            }
            Some(FocusTarget::TrayToggle) => self.toggle_tray(source),
            Some(FocusTarget::TrayClose) => self.close_tray(),
            _ => {}
        }
    }

    pub fn toggle_tray(&mut self, source: InputSource) {
        let focus_target =
            self.tray
                .toggle(source, self.session.as_mut(), &mut self.deferred);
        // The tray column changes the available content width.
        self.remeasure();
        if let Some(target) = focus_target {
            self.focus.focus(target);
        }
    }

    pub fn close_tray(&mut self) {
        self.tray.close(self.session.as_mut(), &mut self.deferred);
        self.remeasure();
    }

    pub fn close_dropdown(&mut self) {
        if self.dropdown_open {
            self.dropdown_open = false;
            self.rebuild_focus();
        }
    }

    pub fn handle_message(&mut self, message: &ChannelMessage) {
        self.tray.handle_message(&message.kind, self.session.as_mut());
        self.remeasure();
    }

    pub fn toggle_sidebar_preference(&mut self) {
        let visible = self.show_sidebar();
        prefs::set_show_discussion_sidebar(self.durable.as_mut(), !visible);
        // The sidebar column changes the strip's available width.
        self.remeasure();
    }

    pub fn toggle_bookmark(&mut self) {
        if let Some(id) = self.unit_id.clone()
            && let Some(unit) = self.store.get_unit_mut(&id)
        {
            unit.bookmarked = !unit.bookmarked;
            self.remeasure();
        }
    }

    pub fn toggle_complete(&mut self) {
        if let Some(id) = self.unit_id.clone()
            && let Some(unit) = self.store.get_unit_mut(&id)
        {
            unit.complete = !unit.complete;
            self.remeasure();
        }
    }

    fn apply_action(&mut self, action: NavAction) {
        match action {
            NavAction::GoToUnit(unit_id) => self.navigate_to_unit(unit_id),
            NavAction::PreviousSequence => self.previous_sequence(),
            NavAction::NextSequence => self.next_sequence(),
            NavAction::CourseExit => self.go_to_course_exit(),
        }
    }

    pub fn navigate_to_unit(&mut self, unit_id: String) {
        self.unit_id = Some(unit_id);
        self.remeasure();
    }

    /// Cross-sequence handoff: land on the previous sequence's last unit.
    pub fn previous_sequence(&mut self) {
        let Some(prev) = self
            .store
            .previous_sequence_id(&self.sequence_id)
            .map(str::to_string)
        else {
            return;
        };
        self.enter_sequence(prev, false);
    }

    /// Cross-sequence handoff: land on the next sequence's first unit.
    pub fn next_sequence(&mut self) {
        let Some(next) = self
            .store
            .next_sequence_id(&self.sequence_id)
            .map(str::to_string)
        else {
            return;
        };
        self.enter_sequence(next, true);
    }

    fn enter_sequence(&mut self, sequence_id: String, at_start: bool) {
        self.sequence_id = sequence_id;
        self.unit_id = self.store.get_sequence(&self.sequence_id).and_then(|seq| {
            if at_start {
                seq.unit_ids.first().cloned()
            } else {
                seq.unit_ids.last().cloned()
            }
        });
        self.dropdown_open = false;
        // A focus hop aimed at the old strip must not land in the new one.
        self.deferred.cancel();
        self.remeasure();
    }

    pub fn go_to_course_exit(&mut self) {
        self.screen = AppScreen::CourseExit;
        self.deferred.cancel();
    }

    pub fn return_from_exit(&mut self) {
        self.screen = AppScreen::Course;
        self.rebuild_focus();
    }
}
