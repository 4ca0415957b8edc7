//! Property tests for the registry contracts.

use proptest::prelude::*;
use runenv::environment::{
    keys, Ambient, Countable, CustomDefaults, EnvValue, Environment, ForwardCursor,
    InvocationContext, KeyedLookup,
};
use runenv::EnvError;

fn key_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(keys::RUNTIME_TICK_LINE.to_string()),
        Just(keys::PHP_VERSION.to_string()),
        Just(keys::RUNTIME_MODE.to_string()),
        "[A-Z][A-Z_]{0,15}",
    ]
}

fn ambient_strategy() -> impl Strategy<Value = Vec<(String, String)>> {
    prop::collection::vec(("[A-Z][A-Z0-9_]{0,11}", "[a-z0-9/]{0,12}"), 0..8)
}

fn build(vars: &[(String, String)], defaults: &CustomDefaults) -> Environment {
    let ambient = vars
        .iter()
        .fold(Ambient::empty(), |ambient, (k, v)| ambient.with_process(k.clone(), v.as_str()));
    Environment::new(ambient, &InvocationContext::console(), defaults)
}

proptest! {
    #[test]
    fn only_allow_listed_keys_are_customizable(
        proposals in prop::collection::vec((key_strategy(), any::<i32>()), 0..10)
    ) {
        let mut defaults = CustomDefaults::new();
        for (key, value) in &proposals {
            defaults.set(key.clone(), *value);
        }

        let expected = proposals
            .iter()
            .rev()
            .find(|(key, _)| key == keys::RUNTIME_TICK_LINE)
            .map(|(_, value)| i64::from(*value))
            .unwrap_or(keys::DEFAULT_TICK_LINE);

        let env = build(&[], &defaults);
        prop_assert_eq!(env.get(keys::RUNTIME_TICK_LINE), Some(&EnvValue::from(expected)));
        prop_assert!(defaults.len() <= 1);
    }

    #[test]
    fn count_never_changes(vars in ambient_strategy()) {
        let env = build(&vars, &CustomDefaults::new());
        let count = env.len();

        env.rewind();
        let mut visited = 0;
        while env.valid() {
            let _ = env.current();
            visited += 1;
            env.next();
        }

        prop_assert_eq!(visited, count);
        prop_assert_eq!(env.len(), count);
    }

    #[test]
    fn writes_always_fail(vars in ambient_strategy(), key in key_strategy()) {
        let env = build(&vars, &CustomDefaults::new());
        let set_failed = matches!(
            env.set(&key, EnvValue::from("x")),
            Err(EnvError::ImmutableWrite { .. })
        );
        let unset_failed = matches!(env.unset(&key), Err(EnvError::ImmutableWrite { .. }));
        prop_assert!(set_failed);
        prop_assert!(unset_failed);
    }
}
