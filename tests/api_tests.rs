//! Resource clients against the in-memory backend.

mod common;

use pretty_assertions::assert_eq;
use realty_console::api::{
    is_owner_in_use, ConsoleApi, CreateOwner, CreateProperty, LoginRequest, PropertySearch,
    UpdateOwner, UserSearch,
};
use realty_console::error::{ConsoleError, ErrorKind};
use realty_console::session::SessionEvent;
use realty_console::validation::{LoginForm, OwnerForm};
use wiremock::MockServer;

use common::{admin, harness, Harness, MockBackend, ADMIN_EMAIL, ADMIN_PASSWORD};

struct Fixture {
    backend: MockBackend,
    _server: MockServer,
    h: Harness,
    api: ConsoleApi,
}

async fn fixture() -> Fixture {
    let backend = MockBackend::seeded();
    let server = backend.start().await;
    let h = harness(&server);
    let api = ConsoleApi::new(h.client.clone());
    Fixture {
        backend,
        _server: server,
        h,
        api,
    }
}

#[tokio::test]
async fn owners_list_returns_seeded_owners() {
    let f = fixture().await;
    let owners = f.api.owners.list().await.unwrap();
    let names: Vec<_> = owners.iter().map(|o| o.name.as_str()).collect();
    assert_eq!(names, vec!["John Doe", "Jane Smith"]);
    assert_eq!(owners[0].address.as_deref(), Some("123 Main St"));
}

#[tokio::test]
async fn owner_with_properties_cannot_be_deleted() {
    let f = fixture().await;

    let err = f.api.owners.delete("1").await.unwrap_err();
    assert_eq!(err.status(), Some(400));
    assert_eq!(err.kind(), ErrorKind::ClientError);
    assert_eq!(err.api_code(), Some("Owner.HasAssociatedProperties"));
    assert!(is_owner_in_use(&err));
    assert_eq!(f.backend.owner_count(), 2);

    f.api.owners.delete("2").await.expect("owner without properties");
    assert_eq!(f.backend.owner_count(), 1);
    assert_eq!(f.h.notifications.all().last().unwrap().title, "Success 204");
}

#[tokio::test]
async fn owner_create_and_update() {
    let f = fixture().await;

    let created = f
        .api
        .owners
        .create(&CreateOwner {
            name: "Ana Lopez".into(),
            address: "9 Elm St".into(),
            phone: None,
            birthday: "1992-02-02".into(),
        })
        .await
        .unwrap();
    assert_eq!(created.id, "3");
    assert_eq!(created.email, "ana.lopez@example.com");

    let updated = f
        .api
        .owners
        .update(
            "3",
            &UpdateOwner {
                phone: Some("555-9999".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.phone.as_deref(), Some("555-9999"));
    assert_eq!(updated.name, "Ana Lopez");

    let missing = f
        .api
        .owners
        .update("42", &UpdateOwner::default())
        .await
        .unwrap_err();
    assert_eq!(missing.status(), Some(404));
    assert!(missing.to_string().contains("Owner not found"));
}

#[tokio::test]
async fn owner_form_feeds_create() {
    let f = fixture().await;
    let form = OwnerForm {
        name: "Luis".into(),
        address: "1 Pine Rd".into(),
        phone: String::new(),
        birthday: "1970-01-01".into(),
    };
    let owner = f
        .api
        .owners
        .create(&form.validate_create().unwrap())
        .await
        .unwrap();
    assert_eq!(owner.name, "Luis");
    assert_eq!(f.backend.owner_count(), 3);
}

#[tokio::test]
async fn properties_search_filters_and_pages() {
    let f = fixture().await;

    let all = f.api.properties.search(&PropertySearch::default()).await.unwrap();
    assert_eq!(all.total_count, 2);
    assert_eq!(all.page, 1);
    assert_eq!(all.total_pages, 1);
    assert_eq!(all.next_page(), None);

    let houses = f
        .api
        .properties
        .search(&PropertySearch {
            name: Some("house".into()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(houses.data.len(), 1);
    assert_eq!(houses.data[0].name, "Beautiful House");
    assert_eq!(houses.data[0].price, 250000.0);
    assert_eq!(houses.data[0].owner_name, "John Doe");
}

#[tokio::test]
async fn property_create_resolves_owner_name() {
    let f = fixture().await;
    let property = f
        .api
        .properties
        .create(&CreateProperty {
            name: "Lake Cabin".into(),
            address: "7 Shore Ln".into(),
            price: 99000.0,
            image: None,
            id_owner: "2".into(),
        })
        .await
        .unwrap();
    assert_eq!(property.id, "3");
    assert_eq!(property.owner_name, "Jane Smith");

    f.api.properties.delete(&property.id).await.unwrap();
    let err = f.api.properties.delete(&property.id).await.unwrap_err();
    assert_eq!(err.status(), Some(404));
}

#[tokio::test]
async fn users_search_filters_by_email() {
    let f = fixture().await;
    let page = f
        .api
        .users
        .search(&UserSearch {
            email: Some("user@".into()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(page.total_count, 1);
    assert_eq!(page.data[0].name, "Regular User");

    f.api.users.delete("2").await.unwrap();
    let rest = f.api.users.search(&UserSearch::default()).await.unwrap();
    assert_eq!(rest.total_count, 1);
}

#[tokio::test]
async fn login_starts_session() {
    let f = fixture().await;
    let mut events = f.h.session.subscribe();

    let identity = f
        .api
        .auth
        .login(&LoginRequest {
            email: ADMIN_EMAIL.into(),
            password: ADMIN_PASSWORD.into(),
        })
        .await
        .unwrap();

    assert_eq!(identity, admin());
    assert_eq!(f.h.session.current(), Some(admin()));
    assert_eq!(events.recv().await.unwrap(), SessionEvent::LoggedIn(admin()));
}

#[tokio::test]
async fn bad_credentials_are_rejected() {
    let f = fixture().await;
    let err = f
        .api
        .auth
        .login(&LoginRequest {
            email: ADMIN_EMAIL.into(),
            password: "wrong-password".into(),
        })
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(401));
    assert!(!f.h.session.is_authenticated());
}

#[tokio::test]
async fn invalid_login_form_never_reaches_backend() {
    let f = fixture().await;
    let err = f
        .api
        .auth
        .login_form(&LoginForm::new("not-an-email", "123"))
        .await
        .unwrap_err();
    match err {
        ConsoleError::Validation(errors) => {
            assert!(errors.get("email").is_some());
            assert!(errors.get("password").is_some());
        }
        other => panic!("expected Validation, got {other:?}"),
    }
    assert!(f.h.notifications.is_empty());
}

#[tokio::test]
async fn logout_clears_session() {
    let f = fixture().await;
    f.api
        .auth
        .login_form(&LoginForm::new(ADMIN_EMAIL, ADMIN_PASSWORD))
        .await
        .unwrap();
    assert!(f.h.session.is_authenticated());

    f.api.auth.logout().await.unwrap();
    assert!(!f.h.session.is_authenticated());
}
