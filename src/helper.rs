use anyhow::Context;
use std::str::FromStr;

/// Value of the given environment variable, `None` when unset or empty.
pub fn env_var_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

/// Parse the given environment variable into `T`. Unset is fine, garbage is not.
pub fn parse_from_env_opt<T>(key: &str) -> anyhow::Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    env_var_opt(key)
        .map(|raw| {
            raw.parse::<T>().with_context(|| {
                format!(
                    "invalid value {raw} in ${key}, expect type: {}",
                    std::any::type_name::<T>()
                )
            })
        })
        .transpose()
}

#[test]
fn parse_from_env() {
    std::env::set_var("COUNTED_CACHE_TEST_BOOL", "true");
    std::env::set_var("COUNTED_CACHE_TEST_BAD", "maybe");

    assert_eq!(
        parse_from_env_opt::<bool>("COUNTED_CACHE_TEST_BOOL").unwrap(),
        Some(true)
    );
    assert_eq!(
        parse_from_env_opt::<bool>("COUNTED_CACHE_TEST_UNSET").unwrap(),
        None
    );
    assert!(parse_from_env_opt::<bool>("COUNTED_CACHE_TEST_BAD").is_err());
}
