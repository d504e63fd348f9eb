//! Lead list projection and row actions

use super::{Lead, LeadId, LeadStatus};

/// Sort field for the lead table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LeadSortField {
    #[default]
    CreatedAt,
    Company,
    Value,
    Status,
}

impl LeadSortField {
    pub fn next(&self) -> Self {
        match self {
            Self::CreatedAt => Self::Company,
            Self::Company => Self::Value,
            Self::Value => Self::Status,
            Self::Status => Self::CreatedAt,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::CreatedAt => "Added",
            Self::Company => "Company",
            Self::Value => "Value",
            Self::Status => "Status",
        }
    }

    /// Stable key used in the config file
    pub fn key(&self) -> &'static str {
        match self {
            Self::CreatedAt => "created_at",
            Self::Company => "company",
            Self::Value => "value",
            Self::Status => "status",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "created_at" => Some(Self::CreatedAt),
            "company" => Some(Self::Company),
            "value" => Some(Self::Value),
            "status" => Some(Self::Status),
            _ => None,
        }
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn toggle(&self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Asc => "↑",
            Self::Desc => "↓",
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "asc" => Some(Self::Asc),
            "desc" => Some(Self::Desc),
            _ => None,
        }
    }
}

/// The lead list as last delivered by the store, plus how it is shown.
///
/// Snapshots replace the list wholesale; sorting and filtering are derived
/// on every read and never cached.
#[derive(Debug, Clone, Default)]
pub struct LeadTable {
    leads: Vec<Lead>,
    loaded: bool,
    pub selected_index: usize,
    pub sort_field: LeadSortField,
    pub sort_direction: SortDirection,
    pub status_filter: Option<LeadStatus>,
}

impl LeadTable {
    /// Replace the current list with a fresh snapshot
    pub fn apply_snapshot(&mut self, leads: Vec<Lead>) {
        self.leads = leads;
        self.loaded = true;
        self.clamp_selection();
    }

    /// Whether any snapshot has arrived yet
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// All leads in the last snapshot, unsorted
    pub fn leads(&self) -> &[Lead] {
        &self.leads
    }

    /// Leads after filtering and sorting, in display order
    pub fn visible(&self) -> Vec<&Lead> {
        let mut rows: Vec<_> = self
            .leads
            .iter()
            .filter(|l| self.status_filter.map_or(true, |s| l.status == s))
            .collect();

        rows.sort_by(|a, b| {
            let cmp = match self.sort_field {
                LeadSortField::CreatedAt => a.created_at.cmp(&b.created_at),
                LeadSortField::Company => a
                    .company
                    .to_lowercase()
                    .cmp(&b.company.to_lowercase()),
                LeadSortField::Value => a.value.cmp(&b.value),
                LeadSortField::Status => a.status.cmp(&b.status),
            }
            .then_with(|| a.id.cmp(&b.id));

            match self.sort_direction {
                SortDirection::Asc => cmp,
                SortDirection::Desc => cmp.reverse(),
            }
        });

        rows
    }

    /// Total annual value of the visible rows
    pub fn visible_total_value(&self) -> u64 {
        self.visible()
            .iter()
            .fold(0u64, |acc, l| acc.saturating_add(l.value))
    }

    pub fn selected(&self) -> Option<&Lead> {
        self.visible().get(self.selected_index).copied()
    }

    /// Move selection down
    pub fn move_selection_down(&mut self) {
        let max = self.visible().len();
        if max > 0 && self.selected_index < max - 1 {
            self.selected_index += 1;
        }
    }

    /// Move selection up
    pub fn move_selection_up(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        }
    }

    pub fn cycle_sort_field(&mut self) {
        self.sort_field = self.sort_field.next();
        self.selected_index = 0;
    }

    pub fn toggle_sort_direction(&mut self) {
        self.sort_direction = self.sort_direction.toggle();
        self.selected_index = 0;
    }

    /// All -> New -> ... -> Closed-Lost -> All
    pub fn cycle_status_filter(&mut self) {
        self.status_filter = match self.status_filter {
            None => Some(LeadStatus::ALL[0]),
            Some(s) if s == LeadStatus::ALL[LeadStatus::ALL.len() - 1] => None,
            Some(s) => Some(s.next()),
        };
        self.selected_index = 0;
    }

    fn clamp_selection(&mut self) {
        let max = self.visible().len();
        if self.selected_index >= max {
            self.selected_index = max.saturating_sub(1);
        }
    }
}

/// Row-level actions offered on the lead table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowAction {
    Delete,
    UpdateStatus,
}

impl RowAction {
    /// Start the confirmation/selection step for this action on a lead
    pub fn begin(self, lead: &Lead) -> PendingRowAction {
        match self {
            Self::Delete => PendingRowAction::Delete(PendingDeleteAction::new(lead)),
            Self::UpdateStatus => PendingRowAction::UpdateStatus(PendingStatusAction::new(lead)),
        }
    }
}

/// A row action waiting on user input before it is dispatched
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingRowAction {
    Delete(PendingDeleteAction),
    UpdateStatus(PendingStatusAction),
}

/// Delete confirmation state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDeleteAction {
    pub lead_id: LeadId,
    pub company: String,
    /// true when "Delete" is highlighted; starts on "Cancel"
    pub selected_option: bool,
}

impl PendingDeleteAction {
    pub fn new(lead: &Lead) -> Self {
        Self {
            lead_id: lead.id,
            company: lead.company.clone(),
            selected_option: false,
        }
    }

    pub fn toggle(&mut self) {
        self.selected_option = !self.selected_option;
    }
}

/// Result of the status picker
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusSelection {
    Selected(LeadStatus),
    /// Typed input that names no status
    Invalid(String),
    Cancelled,
}

/// Status picker state: an enumerated list with type-to-filter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingStatusAction {
    pub lead_id: LeadId,
    pub company: String,
    pub current: LeadStatus,
    pub selected_index: usize,
    pub filter: String,
}

impl PendingStatusAction {
    pub fn new(lead: &Lead) -> Self {
        Self {
            lead_id: lead.id,
            company: lead.company.clone(),
            current: lead.status,
            selected_index: lead.status.position(),
            filter: String::new(),
        }
    }

    /// Statuses matching the typed filter, in pipeline order
    pub fn options(&self) -> Vec<LeadStatus> {
        let needle = normalize(&self.filter);
        LeadStatus::ALL
            .into_iter()
            .filter(|s| needle.is_empty() || normalize(s.label()).contains(&needle))
            .collect()
    }

    pub fn push_filter(&mut self, c: char) {
        self.filter.push(c);
        self.selected_index = 0;
    }

    pub fn pop_filter(&mut self) {
        self.filter.pop();
        self.selected_index = if self.filter.is_empty() {
            self.current.position()
        } else {
            0
        };
    }

    pub fn move_down(&mut self) {
        let len = self.options().len();
        if len > 0 && self.selected_index < len - 1 {
            self.selected_index += 1;
        }
    }

    pub fn move_up(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    /// Resolve the picker into a selection. Input naming no status is invalid.
    pub fn resolve(&self) -> StatusSelection {
        if let Ok(status) = self.filter.parse::<LeadStatus>() {
            return StatusSelection::Selected(status);
        }
        let options = self.options();
        if options.is_empty() {
            return StatusSelection::Invalid(self.filter.trim().to_string());
        }
        StatusSelection::Selected(options[self.selected_index.min(options.len() - 1)])
    }

    pub fn cancel(&self) -> StatusSelection {
        StatusSelection::Cancelled
    }
}

fn normalize(s: &str) -> String {
    s.trim()
        .chars()
        .filter(|c| !matches!(c, '-' | '_' | ' '))
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;

    fn lead(id: u64, company: &str, value: u64, status: LeadStatus) -> Lead {
        Lead {
            id: LeadId(id),
            company: company.to_string(),
            email: format!("sales@{}.com", company.to_lowercase()),
            value,
            status,
            created_at: Utc.timestamp_opt(1_700_000_000 + id as i64, 0).unwrap(),
        }
    }

    fn sample() -> Vec<Lead> {
        vec![
            lead(1, "Globex", 900, LeadStatus::Qualified),
            lead(2, "acme", 500, LeadStatus::New),
            lead(3, "Initech", 100, LeadStatus::ClosedWon),
        ]
    }

    fn ids(rows: &[&Lead]) -> Vec<u64> {
        rows.iter().map(|l| l.id.0).collect()
    }

    mod projection {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_not_loaded_until_first_snapshot() {
            let mut table = LeadTable::default();
            assert!(!table.is_loaded());
            table.apply_snapshot(Vec::new());
            assert!(table.is_loaded());
        }

        #[test]
        fn test_snapshot_replaces_wholesale() {
            let mut table = LeadTable::default();
            table.apply_snapshot(sample());
            table.apply_snapshot(vec![lead(7, "Umbrella", 10, LeadStatus::New)]);
            assert_eq!(ids(&table.visible()), vec![7]);
        }

        #[test]
        fn test_selection_clamped_when_list_shrinks() {
            let mut table = LeadTable::default();
            table.apply_snapshot(sample());
            table.selected_index = 2;
            table.apply_snapshot(vec![lead(1, "Globex", 900, LeadStatus::Qualified)]);
            assert_eq!(table.selected_index, 0);

            table.apply_snapshot(Vec::new());
            assert_eq!(table.selected_index, 0);
            assert!(table.selected().is_none());
        }

        #[test]
        fn test_default_order_is_creation_order() {
            let mut table = LeadTable::default();
            table.apply_snapshot(sample());
            assert_eq!(ids(&table.visible()), vec![1, 2, 3]);
        }

        #[test]
        fn test_sort_by_company_is_case_insensitive() {
            let mut table = LeadTable::default();
            table.apply_snapshot(sample());
            table.sort_field = LeadSortField::Company;
            assert_eq!(ids(&table.visible()), vec![2, 1, 3]);
        }

        #[test]
        fn test_sort_by_value_descending() {
            let mut table = LeadTable::default();
            table.apply_snapshot(sample());
            table.sort_field = LeadSortField::Value;
            table.toggle_sort_direction();
            assert_eq!(ids(&table.visible()), vec![1, 2, 3]);
        }

        #[test]
        fn test_status_filter_and_total() {
            let mut table = LeadTable::default();
            table.apply_snapshot(sample());
            assert_eq!(table.visible_total_value(), 1500);

            table.cycle_status_filter();
            assert_eq!(table.status_filter, Some(LeadStatus::New));
            assert_eq!(ids(&table.visible()), vec![2]);
            assert_eq!(table.visible_total_value(), 500);
        }

        #[test]
        fn test_status_filter_cycles_back_to_all() {
            let mut table = LeadTable::default();
            for _ in 0..LeadStatus::ALL.len() {
                table.cycle_status_filter();
            }
            assert_eq!(table.status_filter, Some(LeadStatus::ClosedLost));
            table.cycle_status_filter();
            assert_eq!(table.status_filter, None);
        }

        #[test]
        fn test_selection_movement_is_bounded() {
            let mut table = LeadTable::default();
            table.apply_snapshot(sample());
            table.move_selection_up();
            assert_eq!(table.selected_index, 0);
            for _ in 0..10 {
                table.move_selection_down();
            }
            assert_eq!(table.selected_index, 2);
            assert_eq!(table.selected().map(|l| l.id), Some(LeadId(3)));
        }

        #[test]
        fn test_sort_keys_round_trip() {
            let mut field = LeadSortField::default();
            for _ in 0..4 {
                assert_eq!(LeadSortField::from_key(field.key()), Some(field));
                field = field.next();
            }
            assert_eq!(SortDirection::from_key("desc"), Some(SortDirection::Desc));
            assert_eq!(SortDirection::from_key("sideways"), None);
        }
    }

    mod row_actions {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_delete_starts_on_cancel() {
            let target = lead(2, "acme", 500, LeadStatus::New);
            let PendingRowAction::Delete(mut pending) = RowAction::Delete.begin(&target) else {
                panic!("expected delete confirmation");
            };
            assert_eq!(pending.lead_id, LeadId(2));
            assert!(!pending.selected_option);
            pending.toggle();
            assert!(pending.selected_option);
        }

        #[test]
        fn test_status_picker_starts_on_current_status() {
            let target = lead(1, "Globex", 900, LeadStatus::Qualified);
            let PendingRowAction::UpdateStatus(pending) = RowAction::UpdateStatus.begin(&target)
            else {
                panic!("expected status picker");
            };
            assert_eq!(pending.resolve(), StatusSelection::Selected(LeadStatus::Qualified));
        }

        #[test]
        fn test_status_picker_navigation() {
            let mut pending = PendingStatusAction::new(&lead(1, "Globex", 900, LeadStatus::New));
            pending.move_down();
            pending.move_down();
            assert_eq!(pending.resolve(), StatusSelection::Selected(LeadStatus::Qualified));
            for _ in 0..10 {
                pending.move_down();
            }
            assert_eq!(pending.resolve(), StatusSelection::Selected(LeadStatus::ClosedLost));
        }

        #[test]
        fn test_filter_narrows_options() {
            let mut pending = PendingStatusAction::new(&lead(1, "Globex", 900, LeadStatus::New));
            for c in "closed".chars() {
                pending.push_filter(c);
            }
            assert_eq!(
                pending.options(),
                vec![LeadStatus::ClosedWon, LeadStatus::ClosedLost]
            );
            pending.move_down();
            assert_eq!(pending.resolve(), StatusSelection::Selected(LeadStatus::ClosedLost));
        }

        #[test]
        fn test_exact_typed_status_wins() {
            let mut pending = PendingStatusAction::new(&lead(1, "Globex", 900, LeadStatus::New));
            for c in "closed won".chars() {
                pending.push_filter(c);
            }
            assert_eq!(pending.resolve(), StatusSelection::Selected(LeadStatus::ClosedWon));
        }

        #[test]
        fn test_unknown_input_is_invalid_not_cancelled() {
            let mut pending = PendingStatusAction::new(&lead(1, "Globex", 900, LeadStatus::New));
            for c in "Bogus".chars() {
                pending.push_filter(c);
            }
            assert!(pending.options().is_empty());
            assert_eq!(pending.resolve(), StatusSelection::Invalid("Bogus".to_string()));
            assert_eq!(pending.cancel(), StatusSelection::Cancelled);
        }

        #[test]
        fn test_clearing_filter_restores_current() {
            let mut pending =
                PendingStatusAction::new(&lead(1, "Globex", 900, LeadStatus::Contacted));
            pending.push_filter('q');
            pending.pop_filter();
            assert_eq!(pending.resolve(), StatusSelection::Selected(LeadStatus::Contacted));
        }
    }
}
