//! Modal carousel navigation over the filtered view.
//!
//! There is no stored cursor: every step locates the current member in the
//! view it is given. If that member is gone (the view changed under an open
//! modal) the step is a no-op rather than a jump to some other position.

use std::borrow::Borrow;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use teamdir_core::{Member, MemberId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Prev,
    Next,
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "prev" | "ArrowLeft" => Ok(Self::Prev),
            "next" | "ArrowRight" => Ok(Self::Next),
            other => Err(format!("unknown direction: {other}")),
        }
    }
}

/// 1-based rank of a member within a view of `total` members.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub index: usize,
    pub total: usize,
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} of {}", self.index, self.total)
    }
}

pub fn resolve_position<M: Borrow<Member>>(view: &[M], member_id: &MemberId) -> Option<Position> {
    view.iter()
        .position(|m| &m.borrow().id == member_id)
        .map(|i| Position {
            index: i + 1,
            total: view.len(),
        })
}

/// Index of `current` in `view`: by id, or by name when `current` has no id.
fn locate<M: Borrow<Member>>(view: &[M], current: &Member) -> Option<usize> {
    if current.id.is_empty() {
        view.iter().position(|m| m.borrow().name == current.name)
    } else {
        view.iter().position(|m| m.borrow().id == current.id)
    }
}

/// The member shown after moving one place from `current`, wrapping at both
/// ends. Returns `current` itself when it is not in `view`.
pub fn step<'a, M: Borrow<Member>>(view: &'a [M], current: &'a Member, direction: Direction) -> &'a Member {
    let Some(index) = locate(view, current) else {
        return current;
    };
    let last = view.len() - 1;
    let next = match direction {
        Direction::Prev => {
            if index == 0 {
                last
            } else {
                index - 1
            }
        }
        Direction::Next => {
            if index == last {
                0
            } else {
                index + 1
            }
        }
    };
    view[next].borrow()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn abc() -> Vec<Member> {
        vec![Member::new("A"), Member::new("B"), Member::new("C")]
    }

    #[test]
    fn prev_from_first_wraps_to_last() {
        let view = abc();
        assert_eq!(step(&view, &view[0], Direction::Prev).name, "C");
    }

    #[test]
    fn next_from_last_wraps_to_first() {
        let view = abc();
        assert_eq!(step(&view, &view[2], Direction::Next).name, "A");
    }

    #[test]
    fn steps_move_one_place() {
        let view = abc();
        assert_eq!(step(&view, &view[1], Direction::Prev).name, "A");
        assert_eq!(step(&view, &view[1], Direction::Next).name, "C");
    }

    #[test]
    fn single_member_steps_onto_itself() {
        let view = vec![Member::new("Solo")];
        assert_eq!(step(&view, &view[0], Direction::Next).name, "Solo");
        assert_eq!(step(&view, &view[0], Direction::Prev).name, "Solo");
    }

    #[test]
    fn stale_member_is_returned_unchanged() {
        let view = abc();
        let gone = Member::new("D");
        let out = step(&view, &gone, Direction::Next);
        assert!(std::ptr::eq(out, &gone));
    }

    #[test]
    fn empty_view_is_a_no_op() {
        let view: Vec<Member> = Vec::new();
        let current = Member::new("A");
        assert!(std::ptr::eq(step(&view, &current, Direction::Prev), &current));
    }

    #[test]
    fn works_over_borrowed_views() {
        let roster = abc();
        let view: Vec<&Member> = vec![&roster[0], &roster[2]];
        assert_eq!(step(&view, &roster[2], Direction::Next).name, "A");
        assert!(std::ptr::eq(step(&view, &roster[1], Direction::Next), &roster[1]));
    }

    #[test]
    fn falls_back_to_name_without_id() {
        let view = abc();
        let current = Member::new("B").with_id("");
        assert_eq!(step(&view, &current, Direction::Next).name, "C");
    }

    #[test]
    fn position_is_one_based() {
        let view = abc();
        let pos = resolve_position(&view, &MemberId::from("c")).unwrap();
        assert_eq!(pos, Position { index: 3, total: 3 });
        assert_eq!(pos.to_string(), "3 of 3");
        assert_eq!(resolve_position(&view, &MemberId::from("z")), None);
    }

    #[test]
    fn direction_parses_control_names() {
        assert_eq!("ArrowLeft".parse::<Direction>().unwrap(), Direction::Prev);
        assert_eq!("next".parse::<Direction>().unwrap(), Direction::Next);
        assert!("up".parse::<Direction>().is_err());
    }
}
