//! Balances carried from one projection month to the next

use crate::assumptions::GrowthAssumptions;

/// User balances at the end of the last projected month
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GrowthState {
    /// Last projected month (0 before the first month)
    pub month: u32,

    /// Total users (free + paying)
    pub total_users: u64,

    /// Paying subscribers
    pub paying_users: u64,
}

impl GrowthState {
    /// Initial balances before month 1
    pub fn from_assumptions(growth: &GrowthAssumptions) -> Self {
        Self {
            month: 0,
            total_users: growth.starting_users,
            // Paying users are a subset of total users
            paying_users: growth.starting_paying_users.min(growth.starting_users),
        }
    }

    /// Move to the next month; balances are updated after the month is calculated
    pub fn advance_month(&mut self) {
        self.month += 1;
    }

    /// Carry this month's closing balances forward
    pub fn close_month(&mut self, total_users: u64, paying_users: u64) {
        self.total_users = total_users;
        self.paying_users = paying_users;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let state = GrowthState::from_assumptions(&GrowthAssumptions::default());

        assert_eq!(state.month, 0);
        assert_eq!(state.total_users, 0);
        assert_eq!(state.paying_users, 0);
    }

    #[test]
    fn test_paying_capped_by_total() {
        let growth = GrowthAssumptions {
            starting_users: 10,
            starting_paying_users: 50,
            ..GrowthAssumptions::default()
        };

        assert_eq!(GrowthState::from_assumptions(&growth).paying_users, 10);
    }
}
