//! Critical-thinking prompts shown alongside a verdict.
//!
//! Prompts are drawn from closed pools; which pools apply depends on the
//! signals that under-scored. The random source is supplied by the caller.

use rand::Rng;

pub const MAX_PROMPTS: usize = 4;

pub const EMOTIONAL_POOL: &[&str] = &[
    "Does this headline make you feel angry, scared, or outraged?",
    "Would you share this if the headline was less dramatic?",
    "Are your emotions influencing your judgment of this content?",
];

pub const SOURCE_POOL: &[&str] = &[
    "Have you heard of this news source before?",
    "Are other major news outlets reporting this story?",
    "Can you find the original source of this information?",
];

pub const EVIDENCE_POOL: &[&str] = &[
    "Does the article cite specific sources or experts?",
    "Can you verify the statistics or claims independently?",
    "Are there links to primary sources or official statements?",
];

pub const DATE_POOL: &[&str] = &[
    "Is this an old story being shared as if it were new?",
    "Have the facts described here changed since it was published?",
    "Is there a more recent report on the same topic?",
];

pub const GENERAL_POOL: &[&str] = &[
    "When was this originally published? Is it still relevant?",
    "Who benefits if you believe and share this story?",
    "What might be missing from this narrative?",
    "Have you read beyond just the headline?",
];

/// Which issue pools apply to a submission.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PromptNeeds {
    pub emotional: bool,
    pub source: bool,
    pub evidence: bool,
    pub date: bool,
}

fn pick<R: Rng + ?Sized>(pool: &[&'static str], rng: &mut R) -> &'static str {
    pool[rng.random_range(0..pool.len())]
}

/// One prompt per applicable pool, then one general prompt. Unique, at most
/// `MAX_PROMPTS`.
pub fn select<R: Rng + ?Sized>(needs: PromptNeeds, rng: &mut R) -> Vec<String> {
    let pools = [
        (needs.emotional, EMOTIONAL_POOL),
        (needs.source, SOURCE_POOL),
        (needs.evidence, EVIDENCE_POOL),
        (needs.date, DATE_POOL),
        (true, GENERAL_POOL),
    ];

    let mut out: Vec<String> = Vec::with_capacity(MAX_PROMPTS);
    for (_, pool) in pools.into_iter().filter(|(on, _)| *on) {
        let p = pick(pool, rng);
        if !out.iter().any(|q| q == p) {
            out.push(p.to_string());
        }
    }
    out.truncate(MAX_PROMPTS);
    out
}

/// True when `prompt` belongs to one of the closed pools.
pub fn is_known_prompt(prompt: &str) -> bool {
    [EMOTIONAL_POOL, SOURCE_POOL, EVIDENCE_POOL, DATE_POOL, GENERAL_POOL]
        .iter()
        .any(|pool| pool.contains(&prompt))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn only_general_when_nothing_flagged() {
        let mut rng = StdRng::seed_from_u64(7);
        let got = select(PromptNeeds::default(), &mut rng);
        assert_eq!(got.len(), 1);
        assert!(GENERAL_POOL.contains(&got[0].as_str()));
    }

    #[test]
    fn capped_at_four_and_unique() {
        let all = PromptNeeds {
            emotional: true,
            source: true,
            evidence: true,
            date: true,
        };
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let got = select(all, &mut rng);
            assert_eq!(got.len(), MAX_PROMPTS);
            assert!(got.iter().all(|p| is_known_prompt(p)));
            // Pools are disjoint, so the first four are one per issue pool.
            assert!(EMOTIONAL_POOL.contains(&got[0].as_str()));
            assert!(DATE_POOL.contains(&got[3].as_str()));
        }
    }

    #[test]
    fn same_seed_same_prompts() {
        let needs = PromptNeeds {
            source: true,
            ..Default::default()
        };
        let a = select(needs, &mut StdRng::seed_from_u64(42));
        let b = select(needs, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }
}
