//! "Meet a random member"

use std::borrow::Borrow;

use rand::Rng;
use teamdir_core::Member;

/// A uniformly chosen member of `view`, or `None` when it is empty.
pub fn pick_random<'a, M, R>(view: &'a [M], rng: &mut R) -> Option<&'a Member>
where
    M: Borrow<Member>,
    R: Rng + ?Sized,
{
    if view.is_empty() {
        return None;
    }
    let index = rng.gen_range(0..view.len());
    Some(view[index].borrow())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn empty_view_yields_none() {
        let view: Vec<Member> = Vec::new();
        assert!(pick_random(&view, &mut rand::thread_rng()).is_none());
    }

    #[test]
    fn picks_come_from_the_view() {
        let view = vec![Member::new("A"), Member::new("B"), Member::new("C")];
        let mut rng = StdRng::seed_from_u64(7);
        let mut seen = HashSet::new();
        for _ in 0..200 {
            let picked = pick_random(&view, &mut rng).unwrap();
            assert!(view.iter().any(|m| std::ptr::eq(m, picked)));
            seen.insert(picked.name.clone());
        }
        assert_eq!(seen.len(), 3);
    }
}
