use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SortField {
    Employer,
    Position,
    From,
    To,
    Client,
}

impl SortField {
    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            SortField::Employer => "employer",
            SortField::Position => "position",
            SortField::From => "from",
            SortField::To => "to",
            SortField::Client => "client",
        }
    }

    /// Convert DB / CLI string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "employer" => Some(SortField::Employer),
            "position" => Some(SortField::Position),
            "from" => Some(SortField::From),
            "to" => Some(SortField::To),
            "client" => Some(SortField::Client),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn to_db_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "asc" => Some(SortDirection::Asc),
            "desc" => Some(SortDirection::Desc),
            _ => None,
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    pub fn arrow(&self) -> &'static str {
        match self {
            SortDirection::Asc => "▲",
            SortDirection::Desc => "▼",
        }
    }
}

/// Current sort selection of the list view (None = no user sort).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct SortState {
    pub field: Option<SortField>,
    pub direction: SortDirection,
}

impl SortState {
    pub fn new(field: SortField, direction: SortDirection) -> Self {
        Self {
            field: Some(field),
            direction,
        }
    }

    /// Selecting the active field flips the direction,
    /// selecting another field restarts ascending.
    pub fn click(&mut self, field: SortField) {
        if self.field == Some(field) {
            self.direction = self.direction.flipped();
        } else {
            self.field = Some(field);
            self.direction = SortDirection::Asc;
        }
    }

    pub fn clear(&mut self) {
        *self = SortState::default();
    }

    pub fn is_active(&self) -> bool {
        self.field.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn click_same_field_toggles_direction() {
        let mut s = SortState::default();
        s.click(SortField::Employer);
        assert_eq!(s, SortState::new(SortField::Employer, SortDirection::Asc));

        s.click(SortField::Employer);
        assert_eq!(s.direction, SortDirection::Desc);

        s.click(SortField::Employer);
        assert_eq!(s.direction, SortDirection::Asc);
    }

    #[test]
    fn click_new_field_resets_to_ascending() {
        let mut s = SortState::new(SortField::From, SortDirection::Desc);
        s.click(SortField::Client);
        assert_eq!(s, SortState::new(SortField::Client, SortDirection::Asc));

        s.clear();
        assert!(!s.is_active());
    }

    #[test]
    fn parses_field_names_case_insensitively() {
        assert_eq!(SortField::from_db_str("TO"), Some(SortField::To));
        assert_eq!(SortField::from_db_str("salary"), None);
    }
}
