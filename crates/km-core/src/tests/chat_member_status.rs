use crate::ChatMemberStatus;

use std::str::FromStr;

use googletest::prelude::*;

#[test]
fn given_joined_statuses_when_checked_then_is_joined() {
    for status in [
        ChatMemberStatus::Member,
        ChatMemberStatus::Administrator,
        ChatMemberStatus::Creator,
    ] {
        assert_that!(status.is_joined(), eq(true));
    }
}

#[test]
fn given_non_joined_statuses_when_checked_then_not_joined() {
    for status in [
        ChatMemberStatus::Left,
        ChatMemberStatus::Kicked,
        ChatMemberStatus::Unknown,
    ] {
        assert_that!(status.is_joined(), eq(false));
    }
}

#[test]
fn given_known_status_string_when_parsed_then_round_trips() {
    for s in ["member", "administrator", "creator", "left", "kicked"] {
        let status = ChatMemberStatus::from_str(s).unwrap();
        assert_that!(status.as_str(), eq(s));
    }
}

#[test]
fn given_unrecognized_status_string_when_parsed_then_unknown() {
    let status = ChatMemberStatus::from_str("restricted").unwrap();
    assert_that!(status, eq(ChatMemberStatus::Unknown));
}
