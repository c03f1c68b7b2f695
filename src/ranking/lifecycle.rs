use std::collections::BTreeMap;

use log::info;

use crate::domain::{Category, LifecycleState, Notification, NotificationKind, SubSeason};

/// Advances a season's lifecycle state from observed completed top-tier
/// tournament counts. A sub-season completes when every category mapped
/// to it has reached its expected CE1 count (per-category configurable,
/// absent entries expect 1); the season completes when all four
/// sub-seasons have.
///
/// Forward-only: a flag already set stays set no matter what the counts
/// say on this run. Un-completing is an administrative reset outside the
/// engine. Returned notifications cover only this run's transitions;
/// storage deduplicates them again by key in case of replays.
pub fn advance_lifecycle(
    state: &LifecycleState,
    completed_ce1: &BTreeMap<Category, u32>,
    expected: &BTreeMap<Category, u32>,
) -> (LifecycleState, Vec<Notification>) {
    let mut next = *state;
    let mut notifications = Vec::new();

    for sub in SubSeason::ALL {
        if next.completed[sub.index()] {
            continue;
        }
        if subseason_ready(sub, completed_ce1, expected) {
            next.completed[sub.index()] = true;
            notifications.push(Notification {
                season: state.season,
                kind: NotificationKind::SubSeasonComplete(sub),
            });
            info!("Sub-season {} of {} completed", sub.number(), state.season);
        }
    }

    if next.season_complete() && !state.season_complete() {
        notifications.push(Notification {
            season: state.season,
            kind: NotificationKind::SeasonComplete,
        });
        info!("Season {} completed", state.season);
    }

    (next, notifications)
}

/// All categories of the sub-season must have closed, not just one.
fn subseason_ready(
    sub: SubSeason,
    completed_ce1: &BTreeMap<Category, u32>,
    expected: &BTreeMap<Category, u32>,
) -> bool {
    sub.categories().iter().all(|category| {
        let completed = completed_ce1.get(category).copied().unwrap_or(0);
        let needed = expected.get(category).copied().unwrap_or(1);
        completed >= needed
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Season;

    fn counts(entries: &[(Category, u32)]) -> BTreeMap<Category, u32> {
        entries.iter().copied().collect()
    }

    fn expect_one() -> BTreeMap<Category, u32> {
        Category::ALL.into_iter().map(|c| (c, 1)).collect()
    }

    #[test]
    fn single_category_subseason_completes_alone() {
        let state = LifecycleState::pending(Season::new(2024));
        let (next, notifications) =
            advance_lifecycle(&state, &counts(&[(Category::BeachMixed, 1)]), &expect_one());

        assert!(next.is_complete(SubSeason::First));
        assert!(!next.is_complete(SubSeason::Second));
        assert_eq!(notifications.len(), 1);
        assert_eq!(
            notifications[0].kind,
            NotificationKind::SubSeasonComplete(SubSeason::First)
        );
    }

    #[test]
    fn multi_category_subseason_requires_all() {
        let state = LifecycleState::pending(Season::new(2024));

        let (partial, notifications) =
            advance_lifecycle(&state, &counts(&[(Category::BeachOpen, 1)]), &expect_one());
        assert!(!partial.is_complete(SubSeason::Second));
        assert!(notifications.is_empty());

        let (done, notifications) = advance_lifecycle(
            &state,
            &counts(&[(Category::BeachOpen, 1), (Category::BeachWomen, 1)]),
            &expect_one(),
        );
        assert!(done.is_complete(SubSeason::Second));
        assert_eq!(notifications.len(), 1);
    }

    #[test]
    fn completed_flag_never_reverts() {
        let mut state = LifecycleState::pending(Season::new(2024));
        state.completed[SubSeason::Second.index()] = true;

        // Rerun with empty counts: the flag must survive, silently.
        let (next, notifications) = advance_lifecycle(&state, &BTreeMap::new(), &expect_one());

        assert!(next.is_complete(SubSeason::Second));
        assert!(notifications.is_empty());
    }

    #[test]
    fn season_completes_only_with_all_four() {
        let mut state = LifecycleState::pending(Season::new(2024));
        state.completed = [true, true, true, false];

        let (next, notifications) =
            advance_lifecycle(&state, &counts(&[(Category::GrassOpen, 1)]), &expect_one());
        assert!(!next.season_complete());
        assert!(notifications.is_empty());

        let (next, notifications) = advance_lifecycle(
            &state,
            &counts(&[(Category::GrassOpen, 1), (Category::GrassWomen, 1)]),
            &expect_one(),
        );
        assert!(next.season_complete());
        assert_eq!(notifications.len(), 2);
        assert_eq!(
            notifications[1].kind,
            NotificationKind::SeasonComplete
        );
    }

    #[test]
    fn rerun_after_completion_emits_nothing() {
        let state = LifecycleState::pending(Season::new(2024));
        let all_done = counts(&[
            (Category::BeachMixed, 1),
            (Category::BeachOpen, 1),
            (Category::BeachWomen, 1),
            (Category::GrassMixed, 1),
            (Category::GrassOpen, 2),
            (Category::GrassWomen, 1),
        ]);

        let (done, first_run) = advance_lifecycle(&state, &all_done, &expect_one());
        assert!(done.season_complete());
        assert_eq!(first_run.len(), 5);

        let (again, second_run) = advance_lifecycle(&done, &all_done, &expect_one());
        assert_eq!(again, done);
        assert!(second_run.is_empty());
    }

    #[test]
    fn expected_counts_are_per_category() {
        let state = LifecycleState::pending(Season::new(2024));
        // Beach open runs a two-leg calendar this season; women still one.
        let mut expected = expect_one();
        expected.insert(Category::BeachOpen, 2);

        let (next, _) = advance_lifecycle(
            &state,
            &counts(&[(Category::BeachOpen, 1), (Category::BeachWomen, 1)]),
            &expected,
        );
        assert!(!next.is_complete(SubSeason::Second));

        let (next, _) = advance_lifecycle(
            &state,
            &counts(&[(Category::BeachOpen, 2), (Category::BeachWomen, 1)]),
            &expected,
        );
        assert!(next.is_complete(SubSeason::Second));
    }

    #[test]
    fn category_absent_from_expectations_defaults_to_one() {
        let state = LifecycleState::pending(Season::new(2024));
        let (next, _) = advance_lifecycle(
            &state,
            &counts(&[(Category::BeachMixed, 1)]),
            &BTreeMap::new(),
        );
        assert!(next.is_complete(SubSeason::First));
    }
}
