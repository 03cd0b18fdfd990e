// Copyright (C) 2026 The weighcrew developers
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    DomainError, Member, MemberRole, UNNAMED_MEMBER, format_calendar_date, parse_calendar_date,
    safe_display_name,
};
use std::str::FromStr;
use time::macros::date;

#[test]
fn test_member_role_round_trips_through_str() {
    assert_eq!(MemberRole::from_str("owner").unwrap(), MemberRole::Owner);
    assert_eq!(MemberRole::from_str("member").unwrap(), MemberRole::Member);
    assert_eq!(MemberRole::Owner.as_str(), "owner");
    assert_eq!(MemberRole::Member.to_string(), "member");
}

#[test]
fn test_member_role_rejects_unknown() {
    assert_eq!(
        MemberRole::from_str("admin"),
        Err(DomainError::InvalidMemberRole(String::from("admin")))
    );
}

#[test]
fn test_safe_display_name_defaults_blank_names() {
    assert_eq!(safe_display_name(None), UNNAMED_MEMBER);
    assert_eq!(safe_display_name(Some("   ")), UNNAMED_MEMBER);
    assert_eq!(safe_display_name(Some("  Anna ")), "Anna");
}

#[test]
fn test_member_new_uses_safe_name() {
    let member: Member = Member::new(7, Some(""), None, MemberRole::Member);
    assert_eq!(member.display_name, UNNAMED_MEMBER);
    assert_eq!(member.user_id, 7);
}

#[test]
fn test_parse_calendar_date() {
    assert_eq!(parse_calendar_date("2026-01-05").unwrap(), date!(2026 - 01 - 05));
    assert_eq!(parse_calendar_date(" 2026-01-05 ").unwrap(), date!(2026 - 01 - 05));
    assert!(matches!(
        parse_calendar_date("2026-02-30"),
        Err(DomainError::DateParseError { .. })
    ));
    assert!(parse_calendar_date("05.01.2026").is_err());
    assert!(parse_calendar_date("").is_err());
}

#[test]
fn test_format_calendar_date_pads() {
    assert_eq!(format_calendar_date(date!(2026 - 03 - 09)), "2026-03-09");
}
