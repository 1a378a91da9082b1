use crate::Config;
use crate::tests::{EnvGuard, setup_config_dir};

use googletest::assert_that;
use googletest::prelude::{anything, eq, ok};
use serial_test::serial;

// =========================================================================
// Happy Path Tests
// =========================================================================

#[test]
#[serial]
fn given_no_config_file_when_load_then_ok_with_defaults() {
    // Given
    let _temp = setup_config_dir();

    // When
    let result = Config::load();

    // Then
    assert_that!(result, ok(anything()));
    let config = result.unwrap();
    assert_that!(config.referral.coins_per_invite, eq(10));
    assert_that!(config.referral.bot_username, eq("kimemuatbot"));
    assert_that!(config.database.path, eq("kimem.db"));
    assert_that!(config.storage.timeout_secs, eq(5));
    assert_that!(config.polling.timeout_secs, eq(30));
    assert_that!(config.forwarding.is_empty(), eq(true));
}

#[test]
#[serial]
fn given_valid_toml_file_when_load_then_ok_and_uses_toml_values() {
    // Given
    let (temp, _guard) = setup_config_dir();
    std::fs::write(
        temp.path().join("config.toml"),
        r#"
              [bot]
              token = "123:abc"
              channel_username = "@kimem"

              [referral]
              coins_per_invite = 25

              [forwarding.channels]
              MAIN = "@kimem_db_main"
          "#,
    )
    .unwrap();

    // When
    let result = Config::load();

    // Then
    assert_that!(result, ok(anything()));
    let config = result.unwrap();
    assert_that!(config.bot.token, eq("123:abc"));
    assert_that!(config.referral.coins_per_invite, eq(25));
    assert_that!(
        config.forwarding.source_for("MAIN"),
        eq(Some("@kimem_db_main"))
    );
}

#[test]
#[serial]
fn given_env_var_and_toml_when_load_then_env_var_overrides_toml() {
    // Given
    let (temp, _guard) = setup_config_dir();
    std::fs::write(
        temp.path().join("config.toml"),
        "[referral]\ncoins_per_invite = 25",
    )
    .unwrap();
    let _coins_guard = EnvGuard::set("KM_REFERRAL_COINS_PER_INVITE", "50");

    // When
    let config = Config::load().unwrap();

    // Then
    assert_that!(config.referral.coins_per_invite, eq(50));
}

#[test]
#[serial]
fn given_multiple_env_overrides_when_load_then_all_apply() {
    // Given
    let _temp = setup_config_dir();
    let _token = EnvGuard::set("KM_BOT_TOKEN", "999:xyz");
    let _channel = EnvGuard::set("KM_CHANNEL_USERNAME", "@gate");
    let _db = EnvGuard::set("KM_DATABASE_PATH", "other.db");
    let _colored = EnvGuard::set("KM_LOG_COLORED", "false");

    // When
    let config = Config::load().unwrap();

    // Then
    assert_that!(config.bot.token, eq("999:xyz"));
    assert_that!(config.bot.channel_username, eq("@gate"));
    assert_that!(config.database.path, eq("other.db"));
    assert_that!(config.logging.colored, eq(false));
}

#[test]
#[serial]
fn given_referral_config_when_link_derived_then_deterministic() {
    let _temp = setup_config_dir();
    let config = Config::load().unwrap();

    assert_that!(
        config.referral.referral_link(42),
        eq("https://t.me/kimemuatbot?start=42")
    );
}

#[test]
#[serial]
fn given_channel_without_at_when_channel_id_then_at_prepended() {
    let _temp = setup_config_dir();
    let _channel = EnvGuard::set("KM_CHANNEL_USERNAME", "kimem");

    let config = Config::load().unwrap();

    assert_that!(config.bot.channel_id(), eq("@kimem"));
    assert_that!(config.bot.channel_slug(), eq("kimem"));
}
