use crate::model::course::{ContentType, CourseStore, Sequence};
use crate::model::position::{self, NavPosition};
use crate::nav::fit::LayoutFit;
use crate::ui::layout::ViewMode;

/// Named action emitted by the engine on user activation. The engine never
/// calls collaborators directly; the application interprets these.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NavAction {
    GoToUnit(String),
    PreviousSequence,
    NextSequence,
    CourseExit,
}

/// Accessibility contract carried by every tab item. Semantics, not markup:
/// exactly one tab in a strip has `tab_index == 0` (the active one).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TabAttrs {
    pub role: &'static str,
    pub selected: bool,
    pub expanded: bool,
    pub controls: String,
    pub tab_index: i8,
}

#[derive(Clone, Debug)]
pub struct TabItem {
    pub unit_id: String,
    pub title: String,
    pub content_type: ContentType,
    pub is_active: bool,
    pub complete: bool,
    pub bookmarked: bool,
    pub show_completion: bool,
    pub attrs: TabAttrs,
}

/// Discrete presentation for the navigation strip.
#[derive(Clone, Debug)]
pub enum RenderMode {
    /// Gated sequence: a single disabled placeholder tab between the
    /// Previous/Next controls.
    Locked,
    /// No units, or the current unit is unknown: a neutral divider between
    /// the Previous/Next controls.
    Empty,
    Tabs(Vec<TabItem>),
    /// Nothing fits: a disabled-looking toggle whose accessible name is the
    /// "position X of N" summary, opening a list mirroring the tabs.
    Dropdown { summary: String, items: Vec<TabItem> },
}

impl RenderMode {
    pub fn items(&self) -> &[TabItem] {
        match self {
            RenderMode::Tabs(items) | RenderMode::Dropdown { items, .. } => items,
            _ => &[],
        }
    }
}

#[derive(Clone, Debug)]
pub struct ButtonSpec {
    pub label: String,
    pub glyph: char,
    pub enabled: bool,
    /// Compact viewports keep only the glyph; the label then serves as the
    /// accessible name rather than visible text.
    pub show_label: bool,
    pub action: NavAction,
}

#[derive(Clone, Debug)]
pub struct NavPlan {
    pub mode: RenderMode,
    pub previous: ButtonSpec,
    pub next: ButtonSpec,
    pub position: Option<NavPosition>,
}

pub const PREVIOUS_LABEL: &str = "Previous";
pub const NEXT_LABEL: &str = "Next";

/// Build the full navigation plan for one frame. Pure with respect to its
/// inputs; re-running with the same inputs yields the same plan, so a late
/// layout measurement re-resolving Tabs into Dropdown is a re-render, not a
/// second event.
pub fn plan(
    store: &CourseStore,
    sequence_id: &str,
    current_unit_id: Option<&str>,
    fit: LayoutFit,
    view: ViewMode,
    rtl: bool,
) -> NavPlan {
    let sequence = store.get_sequence(sequence_id);
    let position = sequence
        .and_then(|seq| position::derive(&seq.unit_ids, current_unit_id));

    // Course-level boundary flags drive the Previous/Next controls; the
    // sequence-level position drives in-sequence movement.
    let at_course_start = position.as_ref().is_some_and(|p| p.is_first_unit)
        && store.is_first_sequence(sequence_id);
    let at_course_end = position.as_ref().is_some_and(|p| p.is_last_unit)
        && store.is_last_sequence(sequence_id);

    // A gated sequence exposes no unit-level movement; its controls operate
    // on the sequence boundary only.
    let gated = sequence.is_some_and(|s| s.gated_content.gated);

    let previous_action = match (&position, sequence) {
        (Some(pos), Some(seq)) if !gated && !pos.is_first_unit => {
            NavAction::GoToUnit(seq.unit_ids[pos.index - 1].clone())
        }
        _ => NavAction::PreviousSequence,
    };

    let exit = store.course_exit_navigation();
    let next_action = match (&position, sequence) {
        (Some(pos), Some(seq)) if !gated && !pos.is_last_unit => {
            NavAction::GoToUnit(seq.unit_ids[pos.index + 1].clone())
        }
        _ if !store.is_last_sequence(sequence_id) => NavAction::NextSequence,
        _ => NavAction::CourseExit,
    };

    // RTL swaps the chevron glyphs only; the handler bindings never swap.
    let (prev_glyph, next_glyph) = if rtl { ('❯', '❮') } else { ('❮', '❯') };

    let previous = ButtonSpec {
        label: PREVIOUS_LABEL.to_string(),
        glyph: prev_glyph,
        enabled: !at_course_start,
        show_label: !view.is_compact(),
        action: previous_action,
    };

    let next_label = match (&next_action, &exit.exit_text) {
        (NavAction::CourseExit, Some(text)) => text.clone(),
        _ => NEXT_LABEL.to_string(),
    };
    let next = ButtonSpec {
        label: next_label,
        glyph: next_glyph,
        enabled: !(at_course_end && !exit.exit_active),
        show_label: !view.is_compact(),
        action: next_action,
    };

    let mode = render_mode(store, sequence, &position, fit);

    NavPlan {
        mode,
        previous,
        next,
        position,
    }
}

fn render_mode(
    store: &CourseStore,
    sequence: Option<&Sequence>,
    position: &Option<NavPosition>,
    fit: LayoutFit,
) -> RenderMode {
    let Some(sequence) = sequence else {
        return RenderMode::Empty;
    };
    if sequence.gated_content.gated {
        return RenderMode::Locked;
    }
    let Some(position) = position else {
        // Covers the empty unit list, a null current unit, and an id that is
        // not in the list. Never an error.
        return RenderMode::Empty;
    };

    let items = tab_items(store, sequence, position.index);
    if fit.is_collapsed() {
        let summary = format!("{} of {}", position.index + 1, sequence.unit_ids.len());
        RenderMode::Dropdown { summary, items }
    } else {
        // Pending measurement renders tabs optimistically and re-resolves
        // once a real measurement lands.
        RenderMode::Tabs(items)
    }
}

fn tab_items(store: &CourseStore, sequence: &Sequence, active_index: usize) -> Vec<TabItem> {
    sequence
        .unit_ids
        .iter()
        .enumerate()
        .map(|(idx, unit_id)| {
            let unit = store.get_unit(unit_id);
            let is_active = idx == active_index;
            TabItem {
                unit_id: unit_id.clone(),
                title: unit.map(|u| u.title.clone()).unwrap_or_default(),
                content_type: unit.map(|u| u.content_type).unwrap_or_default(),
                is_active,
                complete: unit.is_some_and(|u| u.complete),
                bookmarked: unit.is_some_and(|u| u.bookmarked),
                show_completion: sequence.show_completion,
                attrs: TabAttrs {
                    role: "tab",
                    selected: is_active,
                    expanded: is_active,
                    controls: unit_id.clone(),
                    tab_index: if is_active { 0 } else { -1 },
                },
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::course::CourseStore;

    fn store() -> CourseStore {
        let json = r#"{
            "id": "course-v1:test",
            "title": "Test",
            "exit_page_enabled": false,
            "sections": [{
                "id": "s1", "title": "S1",
                "sequences": [
                    {"id": "seq-a", "title": "A", "units": [
                        {"id": "a1", "title": "One", "content_type": "video"},
                        {"id": "a2", "title": "Two", "content_type": "problem"},
                        {"id": "a3", "title": "Three", "content_type": "vertical"}
                    ]},
                    {"id": "seq-b", "title": "B", "gated": true, "units": [
                        {"id": "b1", "title": "Hidden"},
                        {"id": "b2", "title": "Hidden Too"}
                    ]},
                    {"id": "seq-c", "title": "C", "units": []}
                ]
            }]
        }"#;
        CourseStore::from_json(json).unwrap()
    }

    fn tabs_plan(unit: &str) -> NavPlan {
        plan(
            &store(),
            "seq-a",
            Some(unit),
            LayoutFit::Visible { last_index: 2 },
            ViewMode::Wide,
            false,
        )
    }

    #[test]
    fn exactly_one_tab_stop_on_the_active_tab() {
        for unit in ["a1", "a2", "a3"] {
            let plan = tabs_plan(unit);
            let RenderMode::Tabs(items) = &plan.mode else {
                panic!("expected tabs");
            };
            let stops: Vec<_> = items.iter().filter(|t| t.attrs.tab_index == 0).collect();
            assert_eq!(stops.len(), 1);
            assert_eq!(stops[0].unit_id, unit);
            assert!(stops[0].attrs.selected);
            assert_eq!(stops[0].attrs.role, "tab");
            assert!(items
                .iter()
                .filter(|t| t.unit_id != unit)
                .all(|t| t.attrs.tab_index == -1 && !t.attrs.selected));
        }
    }

    #[test]
    fn gated_sequence_is_locked_regardless_of_units() {
        let plan = plan(
            &store(),
            "seq-b",
            Some("b2"),
            LayoutFit::Visible { last_index: 0 },
            ViewMode::Wide,
            false,
        );
        assert!(matches!(plan.mode, RenderMode::Locked));
        // Previous/Next keep their own rules and stay at the sequence
        // boundary; no unit-level movement inside gated content.
        assert!(plan.previous.enabled);
        assert!(plan.next.enabled);
        assert_eq!(plan.previous.action, NavAction::PreviousSequence);
        assert_eq!(plan.next.action, NavAction::NextSequence);
    }

    #[test]
    fn empty_unit_list_and_invalid_unit_render_empty() {
        let s = store();
        let empty = plan(&s, "seq-c", Some("nope"), LayoutFit::Pending, ViewMode::Wide, false);
        assert!(matches!(empty.mode, RenderMode::Empty));

        let invalid = plan(&s, "seq-a", Some("zz"), LayoutFit::Pending, ViewMode::Wide, false);
        assert!(matches!(invalid.mode, RenderMode::Empty));

        let none = plan(&s, "seq-a", None, LayoutFit::Pending, ViewMode::Wide, false);
        assert!(matches!(none.mode, RenderMode::Empty));
    }

    #[test]
    fn unknown_sequence_renders_empty() {
        let p = plan(&store(), "missing", Some("a1"), LayoutFit::Pending, ViewMode::Wide, false);
        assert!(matches!(p.mode, RenderMode::Empty));
    }

    #[test]
    fn dropdown_only_when_nothing_fits() {
        let s = store();
        let collapsed = plan(&s, "seq-a", Some("a2"), LayoutFit::Collapsed, ViewMode::Wide, false);
        match collapsed.mode {
            RenderMode::Dropdown { summary, items } => {
                assert_eq!(summary, "2 of 3");
                assert_eq!(items.len(), 3);
            }
            other => panic!("expected dropdown, got {other:?}"),
        }

        let partial = plan(
            &s,
            "seq-a",
            Some("a2"),
            LayoutFit::Visible { last_index: 1 },
            ViewMode::Wide,
            false,
        );
        assert!(matches!(partial.mode, RenderMode::Tabs(_)));
    }

    #[test]
    fn pending_measurement_renders_tabs_optimistically() {
        let p = plan(&store(), "seq-a", Some("a2"), LayoutFit::Pending, ViewMode::Wide, false);
        assert!(matches!(p.mode, RenderMode::Tabs(_)));
    }

    #[test]
    fn middle_unit_moves_within_the_sequence() {
        let p = tabs_plan("a2");
        assert_eq!(p.previous.action, NavAction::GoToUnit("a1".into()));
        assert_eq!(p.next.action, NavAction::GoToUnit("a3".into()));
        assert!(p.previous.enabled);
        assert!(p.next.enabled);
    }

    #[test]
    fn sequence_boundaries_hand_off_to_adjacent_sequences() {
        let first = tabs_plan("a1");
        assert_eq!(first.previous.action, NavAction::PreviousSequence);
        assert!(!first.previous.enabled, "start of course");

        let last = tabs_plan("a3");
        assert_eq!(last.next.action, NavAction::NextSequence);
        assert!(last.next.enabled);
    }

    #[test]
    fn course_end_uses_exit_resolver() {
        // seq-c is last but empty; drop to a single-sequence store instead.
        let json = r#"{
            "id": "c", "title": "C", "exit_page_enabled": true,
            "exit_text": "Finish up",
            "sections": [{"id": "s", "title": "S", "sequences": [
                {"id": "only", "title": "Only", "units": [
                    {"id": "u1", "title": "One"}
                ]}
            ]}]
        }"#;
        let s = CourseStore::from_json(json).unwrap();

        let p = plan(&s, "only", Some("u1"), LayoutFit::Pending, ViewMode::Wide, false);
        assert_eq!(p.next.action, NavAction::CourseExit);
        assert!(p.next.enabled);
        assert_eq!(p.next.label, "Finish up");
    }

    #[test]
    fn inactive_exit_disables_next_at_course_end() {
        let json = r#"{
            "id": "c", "title": "C",
            "sections": [{"id": "s", "title": "S", "sequences": [
                {"id": "only", "title": "Only", "units": [
                    {"id": "u1", "title": "One"}
                ]}
            ]}]
        }"#;
        let s = CourseStore::from_json(json).unwrap();

        let p = plan(&s, "only", Some("u1"), LayoutFit::Pending, ViewMode::Wide, false);
        assert_eq!(p.next.action, NavAction::CourseExit);
        assert!(!p.next.enabled);
        assert_eq!(p.next.label, NEXT_LABEL);
    }

    #[test]
    fn rtl_swaps_glyphs_but_not_actions() {
        let ltr = tabs_plan("a2");
        let rtl = plan(
            &store(),
            "seq-a",
            Some("a2"),
            LayoutFit::Visible { last_index: 2 },
            ViewMode::Wide,
            true,
        );
        assert_eq!(ltr.previous.glyph, rtl.next.glyph);
        assert_eq!(ltr.next.glyph, rtl.previous.glyph);
        assert_eq!(ltr.previous.action, rtl.previous.action);
        assert_eq!(ltr.next.action, rtl.next.action);
    }

    #[test]
    fn compact_viewport_hides_button_labels() {
        let p = plan(
            &store(),
            "seq-a",
            Some("a2"),
            LayoutFit::Pending,
            ViewMode::Compact,
            false,
        );
        assert!(!p.previous.show_label);
        assert!(!p.next.show_label);
        // Label survives as the accessible name.
        assert_eq!(p.previous.label, PREVIOUS_LABEL);
    }
}
