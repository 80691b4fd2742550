use anyhow::{Context, Result, bail};
use std::{env, str::FromStr};

use super::{
    config_model::{BackendServer, CheckIns, Database, DotEnvyConfig},
    stage::Stage,
};
use crate::usecases::check_ins::MAX_HISTORY_LIMIT;

const DEFAULT_MAX_CONNECTIONS: u32 = 10;
const DEFAULT_CHECK_IN_HISTORY_LIMIT: i64 = 50;

pub fn load() -> Result<DotEnvyConfig> {
    dotenvy::dotenv().ok();

    let backend_server = BackendServer {
        port: required("SERVER_PORT_BACKEND")?,
        body_limit: required("SERVER_BODY_LIMIT")?,
        timeout: required("SERVER_TIMEOUT")?,
    };

    let database = Database {
        url: env::var("DATABASE_URL").context("DATABASE_URL is not set")?,
        max_connections: optional("DATABASE_MAX_CONNECTIONS")?.unwrap_or(DEFAULT_MAX_CONNECTIONS),
    };
    if database.max_connections == 0 {
        bail!("DATABASE_MAX_CONNECTIONS must be greater than zero");
    }

    let check_ins = CheckIns {
        history_limit: optional("CHECK_IN_HISTORY_LIMIT")?
            .unwrap_or(DEFAULT_CHECK_IN_HISTORY_LIMIT),
    };
    if !(1..=MAX_HISTORY_LIMIT).contains(&check_ins.history_limit) {
        bail!("CHECK_IN_HISTORY_LIMIT must be between 1 and {MAX_HISTORY_LIMIT}");
    }

    Ok(DotEnvyConfig {
        stage: get_stage(),
        backend_server,
        database,
        check_ins,
    })
}

pub fn get_stage() -> Stage {
    dotenvy::dotenv().ok();

    let stage_str = env::var("STAGE").unwrap_or_default();
    Stage::try_from(&stage_str).unwrap_or_default()
}

fn required<T>(key: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let raw = env::var(key).with_context(|| format!("{key} is not set"))?;
    raw.trim()
        .parse()
        .with_context(|| format!("{key} is invalid (value: {raw})"))
}

fn optional<T>(key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map(Some)
            .with_context(|| format!("{key} is invalid (value: {raw})")),
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_stage_names() {
        assert_eq!(Stage::try_from("Production").unwrap(), Stage::Production);
        assert_eq!(Stage::try_from(" dev ").unwrap(), Stage::Development);
        assert!(Stage::try_from("staging").is_err());
    }

    #[test]
    fn reads_required_and_optional_values() {
        // Keys unique to this test.
        unsafe {
            env::set_var("GYMDESK_TEST_PORT", "8080");
            env::set_var("GYMDESK_TEST_BAD_PORT", "eighty");
            env::set_var("GYMDESK_TEST_BLANK", "  ");
        }

        assert_eq!(required::<u16>("GYMDESK_TEST_PORT").unwrap(), 8080);
        assert!(required::<u16>("GYMDESK_TEST_BAD_PORT").is_err());
        assert!(required::<u16>("GYMDESK_TEST_MISSING").is_err());
        assert_eq!(optional::<u32>("GYMDESK_TEST_BLANK").unwrap(), None);
        assert_eq!(optional::<u32>("GYMDESK_TEST_MISSING").unwrap(), None);
        assert_eq!(optional::<u16>("GYMDESK_TEST_PORT").unwrap(), Some(8080));
    }
}
