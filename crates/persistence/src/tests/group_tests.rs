// Copyright (C) 2026 The weighcrew developers
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for groups and memberships.

use time::Month;
use weighcrew_domain::MemberRole;

use crate::{GroupData, MemberData, PersistenceError, UserData};

use super::{create_test_group, create_test_persistence, create_test_user, day};

#[test]
fn test_create_group_adds_owner_and_sets_active_group() {
    let mut persistence = create_test_persistence();
    let (owner_id, group_id) = create_test_group(&mut persistence, "anna", "ABCDEF");

    let group: GroupData = persistence.get_group_by_id(group_id).unwrap().unwrap();
    assert_eq!(group.code, "ABCDEF");
    assert_eq!(group.owner_user_id, owner_id);
    assert_eq!(group.cycle_anchor, None);

    assert_eq!(
        persistence.get_member_role(group_id, owner_id).unwrap(),
        Some(MemberRole::Owner)
    );
    let owner: UserData = persistence.get_user_by_id(owner_id).unwrap().unwrap();
    assert_eq!(owner.active_group_id, Some(group_id));
}

#[test]
fn test_group_codes_are_unique() {
    let mut persistence = create_test_persistence();
    create_test_group(&mut persistence, "anna", "ABCDEF");
    assert!(persistence.group_code_exists("ABCDEF").unwrap());
    assert!(!persistence.group_code_exists("ZZZZZZ").unwrap());

    let other: i64 = create_test_user(&mut persistence, "ben");
    let result = persistence.create_group(other, "Copy", "ABCDEF");
    assert!(matches!(result, Err(PersistenceError::ConstraintViolation(_))));

    // The failed transaction must not leave a dangling active group
    let user: UserData = persistence.get_user_by_id(other).unwrap().unwrap();
    assert_eq!(user.active_group_id, None);
}

#[test]
fn test_join_group_is_idempotent() {
    let mut persistence = create_test_persistence();
    let (owner_id, group_id) = create_test_group(&mut persistence, "anna", "ABCDEF");
    let member_id: i64 = create_test_user(&mut persistence, "ben");

    persistence.join_group(group_id, member_id).unwrap();
    persistence.join_group(group_id, member_id).unwrap();
    // The owner re-joining keeps the owner role
    persistence.join_group(group_id, owner_id).unwrap();

    assert_eq!(persistence.count_members(group_id).unwrap(), 2);
    assert_eq!(
        persistence.get_member_role(group_id, owner_id).unwrap(),
        Some(MemberRole::Owner)
    );
    let member: UserData = persistence.get_user_by_id(member_id).unwrap().unwrap();
    assert_eq!(member.active_group_id, Some(group_id));
}

#[test]
fn test_list_members_includes_profile_fields() {
    let mut persistence = create_test_persistence();
    let (_, group_id) = create_test_group(&mut persistence, "anna", "ABCDEF");
    let member_id: i64 = create_test_user(&mut persistence, "ben");
    persistence.join_group(group_id, member_id).unwrap();
    persistence
        .replace_avatar_url(member_id, Some("https://cdn/avatars/b.png"))
        .unwrap();

    let members: Vec<MemberData> = persistence.list_members(group_id).unwrap();
    assert_eq!(members.len(), 2);
    let ben: &MemberData = members.iter().find(|m| m.user_id == member_id).unwrap();
    assert_eq!(ben.role, MemberRole::Member);
    assert_eq!(ben.display_name.as_deref(), Some("ben"));
    assert_eq!(ben.avatar_url.as_deref(), Some("https://cdn/avatars/b.png"));
}

#[test]
fn test_remove_member_clears_active_group() {
    let mut persistence = create_test_persistence();
    let (_, group_id) = create_test_group(&mut persistence, "anna", "ABCDEF");
    let member_id: i64 = create_test_user(&mut persistence, "ben");
    persistence.join_group(group_id, member_id).unwrap();

    persistence.remove_member(group_id, member_id).unwrap();

    assert_eq!(persistence.get_member_role(group_id, member_id).unwrap(), None);
    let member: UserData = persistence.get_user_by_id(member_id).unwrap().unwrap();
    assert_eq!(member.active_group_id, None);

    let again = persistence.remove_member(group_id, member_id);
    assert!(matches!(again, Err(PersistenceError::NotFound(_))));
}

#[test]
fn test_remove_member_keeps_other_active_group() {
    let mut persistence = create_test_persistence();
    let (_, first) = create_test_group(&mut persistence, "anna", "AAAAAA");
    let (_, second) = create_test_group(&mut persistence, "cara", "BBBBBB");
    let member_id: i64 = create_test_user(&mut persistence, "ben");
    persistence.join_group(first, member_id).unwrap();
    persistence.join_group(second, member_id).unwrap();

    persistence.remove_member(first, member_id).unwrap();

    let member: UserData = persistence.get_user_by_id(member_id).unwrap().unwrap();
    assert_eq!(member.active_group_id, Some(second));
}

#[test]
fn test_rename_regenerate_and_anchor() {
    let mut persistence = create_test_persistence();
    let (_, group_id) = create_test_group(&mut persistence, "anna", "ABCDEF");

    persistence.rename_group(group_id, "Potato Crew").unwrap();
    persistence.update_group_code(group_id, "QRSTUV").unwrap();
    persistence
        .set_cycle_anchor(group_id, Some(day(2026, Month::March, 2)))
        .unwrap();

    let group: GroupData = persistence.get_group_by_code("QRSTUV").unwrap().unwrap();
    assert_eq!(group.group_id, group_id);
    assert_eq!(group.name, "Potato Crew");
    assert_eq!(group.cycle_anchor, Some(day(2026, Month::March, 2)));
    assert!(persistence.get_group_by_code("ABCDEF").unwrap().is_none());
}

#[test]
fn test_rename_missing_group_is_not_found() {
    let mut persistence = create_test_persistence();
    let result = persistence.rename_group(77, "Ghost");
    assert!(matches!(result, Err(PersistenceError::NotFound(_))));
}
