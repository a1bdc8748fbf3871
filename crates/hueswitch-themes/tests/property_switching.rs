// Property-based tests for theme switching
// Cyclic closure: n calls to next() or previous() return to the starting theme
// Toggle symmetry: two toggles between existing themes return to the start

use hueswitch_storage::MemoryPreferenceStore;
use hueswitch_themes::*;
use proptest::prelude::*;

fn coordinator_with(count: usize) -> ThemeCoordinator {
    let themes = (0..count)
        .map(|i| ThemeDefinition::new(format!("theme-{}", i), format!("Theme {}", i)))
        .collect();
    ThemeCoordinator::new(themes, CoordinatorConfig::default(), MemoryPreferenceStore::new())
}

proptest! {
    #[test]
    fn prop_next_cycles_back_to_start(count in 1usize..12, start in 0usize..12) {
        let coordinator = coordinator_with(count);
        let start = start % count;
        coordinator.switch_by_index(start as isize);
        let expected = coordinator.active_id();

        for _ in 0..count {
            prop_assert!(!coordinator.next().is_unchanged());
        }
        prop_assert_eq!(coordinator.active_id(), expected);
    }

    #[test]
    fn prop_previous_cycles_back_to_start(count in 1usize..12, start in 0usize..12) {
        let coordinator = coordinator_with(count);
        let start = start % count;
        coordinator.switch_by_index(start as isize);
        let expected = coordinator.active_id();

        for _ in 0..count {
            coordinator.previous();
        }
        prop_assert_eq!(coordinator.active_id(), expected);
    }

    #[test]
    fn prop_next_then_previous_is_identity(count in 1usize..12, start in 0usize..12) {
        let coordinator = coordinator_with(count);
        coordinator.switch_by_index((start % count) as isize);
        let expected = coordinator.active_id();

        coordinator.next();
        coordinator.previous();
        prop_assert_eq!(coordinator.active_id(), expected);
    }

    #[test]
    fn prop_toggle_twice_returns_to_start(start_dark in any::<bool>(), toggles in 0usize..8) {
        let coordinator = ThemeCoordinator::new(
            ThemeDefinition::builtin(),
            CoordinatorConfig::default(),
            MemoryPreferenceStore::new(),
        );
        let start = if start_dark { "dark" } else { "light" };
        coordinator.switch_by_id(start, false);

        for _ in 0..toggles * 2 {
            coordinator.toggle_between("light", "dark");
        }
        let settled = coordinator.active_id();
        prop_assert_eq!(settled.as_deref(), Some(start));

        coordinator.toggle_between("light", "dark");
        let flipped = coordinator.active_id();
        prop_assert_ne!(flipped.as_deref(), Some(start));
    }

    #[test]
    fn prop_index_is_clamped(count in 1usize..8, index in -20isize..20) {
        let coordinator = coordinator_with(count);
        let outcome = coordinator.switch_by_index(index);
        let expected = index.clamp(0, count as isize - 1);
        let expected_id = format!("theme-{}", expected);
        prop_assert_eq!(outcome.theme_id(), Some(expected_id.as_str()));
    }
}
