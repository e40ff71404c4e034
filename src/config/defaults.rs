pub(super) const fn default_area_id() -> i64 {
    1
}

pub(super) const fn default_team_id() -> i64 {
    5
}

pub(super) const fn default_ticket_type_id() -> i64 {
    6
}

pub(super) const fn default_closed_stage_id() -> i64 {
    69
}

pub(super) const fn default_excluded_stage_id() -> i64 {
    68
}
