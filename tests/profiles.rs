mod common;

use common::{register, server};

#[tokio::test]
async fn profile_reflects_registration() {
    let (server, _) = server();
    let reg = register(&server, "validemail@gmail.com", "Hayden", "Everest").await;

    let profile = server.user_profile(&reg.token, reg.u_id).await.unwrap();
    assert_eq!(profile.email, "validemail@gmail.com");
    assert_eq!(profile.handle_str, "haydeneverest");
    assert_eq!(profile.profile_img_url, None);

    assert!(server.user_profile(&reg.token, 99).await.unwrap_err().is_input());
    assert!(server.user_profile("nope", reg.u_id).await.unwrap_err().is_access());
}

#[tokio::test]
async fn users_all_lists_everyone() {
    let (server, _) = server();
    let a = register(&server, "a@gmail.com", "Apple", "Appleson").await;
    register(&server, "b@gmail.com", "Orange", "Orangeson").await;

    let all = server.users_all(&a.token).await.unwrap();
    let handles: Vec<&str> = all.iter().map(|p| p.handle_str.as_str()).collect();
    assert_eq!(handles, ["appleappleson", "orangeorangeson"]);
}

#[tokio::test]
async fn duplicate_names_get_distinct_handles() {
    let (server, _) = server();
    let a = register(&server, "a@gmail.com", "Same", "Name").await;
    let b = register(&server, "b@gmail.com", "Same", "Name").await;

    let a = server.user_with_id(a.u_id).await.unwrap();
    let b = server.user_with_id(b.u_id).await.unwrap();
    assert_ne!(a.handle, b.handle);
}

#[tokio::test]
async fn edit_name_email_and_handle() {
    let (server, _) = server();
    let me = register(&server, "me@gmail.com", "Me", "Myself").await;
    let other = register(&server, "other@gmail.com", "Other", "Person").await;

    server.set_name(&me.token, "New", "Name").await.unwrap();
    assert!(server.set_name(&me.token, "", "Name").await.unwrap_err().is_input());

    server.set_email(&me.token, "fresh@gmail.com").await.unwrap();
    assert!(server.set_email(&me.token, "fresh@gmail.com").await.unwrap_err().is_input());
    assert!(server.set_email(&me.token, "other@gmail.com").await.unwrap_err().is_input());
    assert!(server.set_email(&me.token, "bad.email").await.unwrap_err().is_input());

    server.set_handle(&me.token, "newhandle").await.unwrap();
    assert!(server.set_handle(&other.token, "newhandle").await.unwrap_err().is_input());
    assert!(server.set_handle(&me.token, "ab").await.unwrap_err().is_input());
    assert!(server.set_handle(&me.token, &"x".repeat(21)).await.unwrap_err().is_input());

    let profile = server.user_profile(&other.token, me.u_id).await.unwrap();
    assert_eq!(
        (profile.name_first.as_str(), profile.email.as_str(), profile.handle_str.as_str()),
        ("New", "fresh@gmail.com", "newhandle")
    );
    assert_eq!(server.user_with_handle("newhandle").await.unwrap().u_id, me.u_id);
}

#[tokio::test]
async fn only_owners_change_permissions() {
    let (server, _) = server();
    let owner = register(&server, "owner@gmail.com", "Own", "Er").await;
    let member = register(&server, "member@gmail.com", "Mem", "Ber").await;

    let err = server
        .admin_userpermission_change(&member.token, owner.u_id, 2)
        .await
        .unwrap_err();
    assert!(err.is_access());

    let err = server
        .admin_userpermission_change(&owner.token, member.u_id, 3)
        .await
        .unwrap_err();
    assert!(err.is_input());
    assert!(server.admin_userpermission_change(&owner.token, 42, 1).await.unwrap_err().is_input());

    server.admin_userpermission_change(&owner.token, member.u_id, 1).await.unwrap();
    let profile = server.user_profile(&owner.token, member.u_id).await.unwrap();
    assert_eq!(profile.permission_id, flockr::PermissionId::Owner);

    // a promoted member may now demote the original owner
    server.admin_userpermission_change(&member.token, owner.u_id, 2).await.unwrap();
}
