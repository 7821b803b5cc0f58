//! End-to-end checks of the standard permission map.

use std::thread;

use warden_predicates::{
    Annotation, AuthClient, Authorizer, Context, Group, GroupRole, Identity, Membership,
    Permission, User,
};

fn authorizer() -> Authorizer {
    Authorizer::standard().unwrap()
}

fn member_of(group: &Group, name: &str, roles: &[GroupRole]) -> User {
    User::new(name, &group.authority).with_membership(group.id, roles.iter().copied())
}

fn removal(group: &Group, target: &User) -> Context {
    let membership = target
        .membership_of(group.id)
        .cloned()
        .unwrap_or_else(|| Membership::new(group.id, []));
    Context::for_membership(group.clone(), target.clone(), membership)
}

#[test]
fn moderator_removes_member() {
    let group = Group::private("example.com");
    let moderator = member_of(&group, "moderator", &[GroupRole::Moderator]);
    let member = member_of(&group, "member", &[GroupRole::Member]);

    assert!(authorizer()
        .check(
            Permission::GroupMemberRemove,
            &Identity::for_user(moderator),
            &removal(&group, &member)
        )
        .unwrap());
}

#[test]
fn moderator_cannot_remove_admin() {
    let group = Group::private("example.com");
    let moderator = member_of(&group, "moderator", &[GroupRole::Moderator]);
    let admin = member_of(&group, "admin", &[GroupRole::Admin]);

    assert!(!authorizer()
        .check(
            Permission::GroupMemberRemove,
            &Identity::for_user(moderator),
            &removal(&group, &admin)
        )
        .unwrap());
}

#[test]
fn owner_removes_owner() {
    let group = Group::private("example.com");
    let owner = member_of(&group, "owner", &[GroupRole::Owner]);
    let co_owner = member_of(&group, "co-owner", &[GroupRole::Owner]);

    assert!(authorizer()
        .check(
            Permission::GroupMemberRemove,
            &Identity::for_user(owner),
            &removal(&group, &co_owner)
        )
        .unwrap());
}

#[test]
fn members_can_leave() {
    let group = Group::private("example.com");
    let member = member_of(&group, "member", &[GroupRole::Member]);

    assert!(authorizer()
        .check(
            Permission::GroupMemberRemove,
            &Identity::for_user(member.clone()),
            &removal(&group, &member)
        )
        .unwrap());
}

#[test]
fn outsiders_cannot_remove_anyone() {
    let group = Group::private("example.com");
    let outsider = User::new("outsider", "example.com");
    let member = member_of(&group, "member", &[]);

    let authorizer = authorizer();
    assert!(!authorizer
        .check(
            Permission::GroupMemberRemove,
            &Identity::for_user(outsider.clone()),
            &removal(&group, &member)
        )
        .unwrap());
    assert!(!authorizer
        .check(
            Permission::GroupMemberRemove,
            &Identity::for_user(outsider.clone()),
            &removal(&group, &outsider)
        )
        .unwrap());
}

#[test]
fn anonymous_removal_is_denied_not_an_error() {
    let group = Group::private("example.com");
    let member = member_of(&group, "member", &[]);

    // authenticated_user gates group_member_remove, so it never runs ungated.
    assert!(!authorizer()
        .check(
            Permission::GroupMemberRemove,
            &Identity::anonymous(),
            &removal(&group, &member)
        )
        .unwrap());
}

#[test]
fn admin_pages() {
    let authorizer = authorizer();
    let context = Context::empty();

    let admin = Identity::for_user(User::new("root", "example.com").with_admin(true));
    let staff = Identity::for_user(User::new("help", "example.com").with_staff(true));
    let plain = Identity::for_user(User::new("plain", "example.com"));

    assert!(authorizer.check(Permission::AdminHighRisk, &admin, &context).unwrap());
    assert!(!authorizer.check(Permission::AdminHighRisk, &staff, &context).unwrap());
    assert!(authorizer.check(Permission::AdminLowRisk, &staff, &context).unwrap());
    assert!(!authorizer.check(Permission::AdminLowRisk, &plain, &context).unwrap());
    assert!(!authorizer
        .check(Permission::AdminLowRisk, &Identity::anonymous(), &context)
        .unwrap());
}

#[test]
fn group_read_and_write() {
    let authorizer = authorizer();
    let group = Group::private("example.com");
    let member = Identity::for_user(member_of(&group, "member", &[]));
    let stranger = Identity::for_user(User::new("stranger", "example.com"));
    let context = Context::for_group(group);

    assert!(authorizer.check(Permission::GroupRead, &member, &context).unwrap());
    assert!(authorizer.check(Permission::GroupWrite, &member, &context).unwrap());
    assert!(!authorizer.check(Permission::GroupRead, &stranger, &context).unwrap());
    assert!(!authorizer.check(Permission::GroupWrite, &stranger, &context).unwrap());

    let open = Context::for_group(Group::open("example.com"));
    assert!(authorizer.check(Permission::GroupWrite, &stranger, &open).unwrap());
    assert!(authorizer.check(Permission::GroupJoin, &stranger, &open).unwrap());

    let foreign = Identity::for_user(User::new("visitor", "elsewhere.org"));
    assert!(authorizer.check(Permission::GroupRead, &foreign, &open).unwrap());
    assert!(!authorizer.check(Permission::GroupWrite, &foreign, &open).unwrap());
    assert!(!authorizer.check(Permission::GroupJoin, &foreign, &open).unwrap());
}

#[test]
fn group_moderation() {
    let authorizer = authorizer();
    let creator = User::new("creator", "example.com");
    let group = Group::private("example.com").with_creator(creator.id);
    let moderator = member_of(&group, "moderator", &[GroupRole::Moderator]);
    let member = member_of(&group, "member", &[]);
    let context = Context::for_group(group);

    let creator = Identity::for_user(creator);
    let moderator = Identity::for_user(moderator);
    let member = Identity::for_user(member);

    assert!(authorizer.check(Permission::GroupEdit, &creator, &context).unwrap());
    assert!(authorizer.check(Permission::GroupUpsert, &creator, &context).unwrap());
    assert!(!authorizer.check(Permission::GroupEdit, &moderator, &context).unwrap());
    assert!(authorizer.check(Permission::GroupModerate, &moderator, &context).unwrap());
    assert!(!authorizer.check(Permission::GroupModerate, &member, &context).unwrap());
}

#[test]
fn annotation_lifecycle() {
    let authorizer = authorizer();
    let group = Group::private("example.com");
    let author = member_of(&group, "author", &[]);
    let reader = member_of(&group, "reader", &[]);
    let outsider = User::new("outsider", "example.com");

    let draft = Annotation::new(author.userid.clone());
    let published = draft.clone().with_shared(true);
    let deleted = published.clone().with_deleted(true);

    let can = |permission: Permission, identity: &User, annotation: &Annotation| {
        let context = Context::for_annotation(annotation.clone(), Some(group.clone()));
        authorizer
            .check(permission, &Identity::for_user(identity.clone()), &context)
            .unwrap()
    };

    assert!(can(Permission::AnnotationRead, &author, &draft));
    assert!(!can(Permission::AnnotationRead, &reader, &draft));
    assert!(can(Permission::AnnotationRead, &reader, &published));
    assert!(!can(Permission::AnnotationRead, &outsider, &published));
    assert!(!can(Permission::AnnotationRead, &author, &deleted));

    assert!(can(Permission::AnnotationUpdate, &author, &published));
    assert!(!can(Permission::AnnotationUpdate, &reader, &published));
    assert!(!can(Permission::AnnotationDelete, &author, &deleted));
}

#[test]
fn client_permissions() {
    let authorizer = authorizer();
    let lms = Identity::for_client(AuthClient::new("lms.hypothes.is"));
    let partner = Identity::for_client(AuthClient::new("partner.org"));

    assert!(authorizer.check(Permission::ApiBulkAction, &lms, &Context::empty()).unwrap());
    assert!(!authorizer.check(Permission::ApiBulkAction, &partner, &Context::empty()).unwrap());

    let partner_user = Context::for_user(User::new("pat", "partner.org"));
    assert!(authorizer.check(Permission::UserRead, &partner, &partner_user).unwrap());
    assert!(!authorizer.check(Permission::UserUpdate, &lms, &partner_user).unwrap());

    let partner_group = Context::for_group(Group::private("partner.org"));
    assert!(authorizer.check(Permission::GroupMemberAdd, &partner, &partner_group).unwrap());
    assert!(!authorizer.check(Permission::GroupMemberAdd, &lms, &partner_group).unwrap());
}

#[test]
fn fixtures_from_json() {
    let identity: Identity = serde_json::from_str(
        r#"{
            "user": {
                "userid": "acct:quinn@example.com",
                "authority": "example.com",
                "memberships": [
                    {"group": "0b4cbd6c-8f3e-4a8e-9c43-7b1b1d1b6b8e", "roles": ["admin"]}
                ]
            }
        }"#,
    )
    .unwrap();

    let context: Context = serde_json::from_str(
        r#"{
            "group": {
                "id": "0b4cbd6c-8f3e-4a8e-9c43-7b1b1d1b6b8e",
                "authority": "example.com",
                "readable_by": "members",
                "writeable_by": "members"
            },
            "user": {"userid": "acct:rory@example.com", "authority": "example.com"},
            "membership": {
                "group": "0b4cbd6c-8f3e-4a8e-9c43-7b1b1d1b6b8e",
                "roles": ["moderator"]
            }
        }"#,
    )
    .unwrap();

    let decision = authorizer()
        .evaluate("group:member_remove", &identity, &context)
        .unwrap();
    assert!(decision.is_granted());
    assert_eq!(
        decision.trace[0].evaluated,
        vec![
            "authenticated",
            "authenticated_user",
            "group_found",
            "group_member_remove"
        ]
    );
}

#[test]
fn authorizer_is_shared_across_threads() {
    let authorizer = authorizer();
    let group = Group::open("example.com");

    thread::scope(|scope| {
        for n in 0..4 {
            let authorizer = authorizer.clone();
            let context = Context::for_group(group.clone());
            scope.spawn(move || {
                let user = User::new(&format!("reader{}", n), "example.com");
                assert!(authorizer
                    .check(Permission::GroupRead, &Identity::for_user(user), &context)
                    .unwrap());
            });
        }
    });
}
