//! The like/dislike machine.
//!
//! Each (user, post) pair sits in one of three states; an incoming
//! like or dislike moves it through a fixed transition table, and the
//! post's `likes` and `weight` both absorb the same delta. Repeating
//! the current reaction toggles it off; switching sides reverses the
//! old vote and applies the new one, hence the two-step delta.

use serde::{Deserialize, Serialize};

/// A user's standing reaction to a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Reaction {
    None,
    Liked,
    Disliked,
}

/// An incoming reaction action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReactionKind {
    Like,
    Dislike,
}

/// Outcome of one transition: the next state and the tally delta to
/// apply to both `likes` and `weight`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReactionShift {
    pub next: Reaction,
    pub delta: i32,
}

/// The full transition table.
pub const fn shift(current: Reaction, action: ReactionKind) -> ReactionShift {
    match (current, action) {
        (Reaction::None, ReactionKind::Like) => ReactionShift {
            next: Reaction::Liked,
            delta: 1,
        },
        (Reaction::Liked, ReactionKind::Like) => ReactionShift {
            next: Reaction::None,
            delta: -1,
        },
        (Reaction::Disliked, ReactionKind::Like) => ReactionShift {
            next: Reaction::Liked,
            delta: 2,
        },
        (Reaction::None, ReactionKind::Dislike) => ReactionShift {
            next: Reaction::Disliked,
            delta: -1,
        },
        (Reaction::Disliked, ReactionKind::Dislike) => ReactionShift {
            next: Reaction::None,
            delta: 1,
        },
        (Reaction::Liked, ReactionKind::Dislike) => ReactionShift {
            next: Reaction::Disliked,
            delta: -2,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeating_a_reaction_toggles_it_off() {
        let liked = shift(Reaction::None, ReactionKind::Like);
        assert_eq!(liked.next, Reaction::Liked);
        assert_eq!(liked.delta, 1);

        let undone = shift(liked.next, ReactionKind::Like);
        assert_eq!(undone.next, Reaction::None);
        assert_eq!(undone.delta, -1);
    }

    #[test]
    fn switching_sides_reverses_the_old_vote_first() {
        assert_eq!(
            shift(Reaction::Disliked, ReactionKind::Like),
            ReactionShift {
                next: Reaction::Liked,
                delta: 2,
            }
        );
        assert_eq!(
            shift(Reaction::Liked, ReactionKind::Dislike),
            ReactionShift {
                next: Reaction::Disliked,
                delta: -2,
            }
        );
    }

    #[test]
    fn like_then_dislike_then_dislike_walks_back_to_zero() {
        let mut state = Reaction::None;
        let mut weight = 0;

        for (action, expected) in [
            (ReactionKind::Like, 1),
            (ReactionKind::Dislike, -1),
            (ReactionKind::Dislike, 0),
        ] {
            let step = shift(state, action);
            state = step.next;
            weight += step.delta;
            assert_eq!(weight, expected);
        }
        assert_eq!(state, Reaction::None);
    }

    #[test]
    fn every_transition_round_trips_to_a_zero_sum() {
        // Applying any action twice from a clean slate nets out.
        for action in [ReactionKind::Like, ReactionKind::Dislike] {
            let first = shift(Reaction::None, action);
            let second = shift(first.next, action);
            assert_eq!(first.delta + second.delta, 0);
            assert_eq!(second.next, Reaction::None);
        }
    }
}
