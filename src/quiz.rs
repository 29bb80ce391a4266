//! Quiz question selection.
//!
//! The selector is pure: the caller supplies the eligible pool and the set
//! of ids already served this session, and gets back one unseen question or
//! `None` once the pool is exhausted. Set-difference first, then a single
//! uniform pick, so a draw always terminates in one pass over the pool.

use std::collections::HashSet;

use rand::seq::SliceRandom;

use crate::db::Question;

pub fn draw(eligible: Vec<Question>, seen: &HashSet<i64>) -> Option<Question> {
    let unseen: Vec<Question> = eligible
        .into_iter()
        .filter(|q| !seen.contains(&q.id))
        .collect();
    unseen.choose(&mut rand::thread_rng()).cloned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(id: i64) -> Question {
        Question {
            id,
            question: format!("question {id}"),
            answer: Some(format!("answer {id}")),
            category: Some(1),
            difficulty: Some(1),
        }
    }

    fn pool(n: i64) -> Vec<Question> {
        (1..=n).map(question).collect()
    }

    #[test]
    fn never_returns_a_seen_question() {
        let seen = HashSet::from([1, 2, 3]);
        for _ in 0..100 {
            let drawn = draw(pool(4), &seen).unwrap();
            assert_eq!(drawn.id, 4);
        }
    }

    #[test]
    fn exhausts_pool_in_exactly_pool_size_draws() {
        let mut seen = HashSet::new();
        for _ in 0..5 {
            let drawn = draw(pool(5), &seen).expect("pool should not be exhausted yet");
            assert!(seen.insert(drawn.id), "question {} drawn twice", drawn.id);
        }
        assert!(draw(pool(5), &seen).is_none());
    }

    #[test]
    fn empty_pool_is_exhausted_not_an_error() {
        assert!(draw(vec![], &HashSet::new()).is_none());
        assert!(draw(vec![], &HashSet::from([7])).is_none());
    }

    #[test]
    fn seen_ids_outside_the_pool_are_ignored() {
        let seen = HashSet::from([100, 200, 300]);
        let drawn = draw(pool(2), &seen).unwrap();
        assert!(drawn.id == 1 || drawn.id == 2);
    }

    #[test]
    fn all_unseen_questions_are_reachable() {
        let mut drawn_ids = HashSet::new();
        for _ in 0..500 {
            drawn_ids.insert(draw(pool(3), &HashSet::new()).unwrap().id);
        }
        assert_eq!(drawn_ids, HashSet::from([1, 2, 3]));
    }
}
