/// Position of the current unit within the active sequence. Derived state:
/// recomputed whenever the sequence or unit changes, never stored.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavPosition {
    pub index: usize,
    pub is_first_unit: bool,
    pub is_last_unit: bool,
}

/// `None` when the unit list is empty, the unit id is absent, or the id is
/// not in the list. Callers must treat that as an empty/locked rendering
/// state, never as "first and last simultaneously".
pub fn derive(unit_ids: &[String], unit_id: Option<&str>) -> Option<NavPosition> {
    let unit_id = unit_id?;
    let index = unit_ids.iter().position(|id| id == unit_id)?;
    Some(NavPosition {
        index,
        is_first_unit: index == 0,
        is_last_unit: index == unit_ids.len() - 1,
    })
}
