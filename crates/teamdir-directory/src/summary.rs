//! Results summary line

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub shown: usize,
    pub total: usize,
    pub filters_active: bool,
}

impl Summary {
    pub fn new(shown: usize, total: usize, filters_active: bool) -> Self {
        Self {
            shown,
            total,
            filters_active,
        }
    }
}

impl std::fmt::Display for Summary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if !self.filters_active && self.shown == self.total {
            write!(f, "Showing all {} team members", self.total)
        } else if self.shown == 0 {
            write!(f, "No team members found matching your criteria")
        } else {
            write!(f, "Showing {} of {} team members", self.shown, self.total)
        }
    }
}
