//! Login, logout and signup flows.

mod common;

use axum::http::StatusCode;
use common::harness::TestApp;
use pretty_assertions::assert_eq;

const INVALID_LOGIN: &str = "Пожалуйста, введите правильные имя пользователя и пароль.";

mod login {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn correct_credentials_redirect_home() {
        let app = TestApp::new();
        app.create_user("testuser", "testpassword");
        let mut client = app.client();

        client
            .login("testuser", "testpassword")
            .await
            .assert_redirects("/");
        assert!(client.has_session());
    }

    #[tokio::test]
    async fn wrong_password_shows_non_field_error() {
        let app = TestApp::new();
        app.create_user("testuser", "testpassword");
        let mut client = app.client();

        let response = client.login("testuser", "nope").await;

        response.assert_template("registration/login.html");
        assert_eq!(response.form_errors("__all__"), [INVALID_LOGIN]);
        assert!(!client.has_session());
    }

    #[tokio::test]
    async fn unknown_user_shows_same_error() {
        let app = TestApp::new();
        let response = app.client().login("nobody", "pw").await;
        assert_eq!(response.form_errors("__all__"), [INVALID_LOGIN]);
    }

    #[tokio::test]
    async fn blank_fields_are_required() {
        let app = TestApp::new();
        let response = app
            .client()
            .post_form("/auth/login/", &[("username", ""), ("password", "")])
            .await;
        assert_eq!(response.form_errors("username"), ["Обязательное поле."]);
        assert_eq!(response.form_errors("password"), ["Обязательное поле."]);
    }

    #[tokio::test]
    async fn next_parameter_is_followed() {
        let app = TestApp::new();
        app.create_user("testuser", "testpassword");
        let mut client = app.client();

        let login_page = client.get("/auth/login/?next=/notes/").await;
        assert_eq!(login_page.context["next"], "/notes/");

        client
            .post_form(
                "/auth/login/",
                &[
                    ("username", "testuser"),
                    ("password", "testpassword"),
                    ("next", "/notes/"),
                ],
            )
            .await
            .assert_redirects("/notes/");
        client.get("/notes/").await.assert_template("notes/list.html");
    }

    #[tokio::test]
    async fn offsite_next_is_ignored() {
        let app = TestApp::new();
        app.create_user("testuser", "testpassword");

        app.client()
            .post_form(
                "/auth/login/?next=//evil.example/",
                &[("username", "testuser"), ("password", "testpassword")],
            )
            .await
            .assert_redirects("/");
    }
}

mod signup {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn new_account_can_log_in() {
        let app = TestApp::new();
        let mut client = app.client();

        client
            .post_form(
                "/auth/signup/",
                &[
                    ("username", "newuser"),
                    ("password1", "s3cret-pass"),
                    ("password2", "s3cret-pass"),
                ],
            )
            .await
            .assert_redirects("/auth/login/");

        client
            .login("newuser", "s3cret-pass")
            .await
            .assert_redirects("/");
    }

    #[tokio::test]
    async fn taken_username_is_rejected() {
        let app = TestApp::new();
        app.create_user("user1", "password1");

        let response = app
            .client()
            .post_form(
                "/auth/signup/",
                &[
                    ("username", "user1"),
                    ("password1", "other"),
                    ("password2", "other"),
                ],
            )
            .await;

        response.assert_template("registration/signup.html");
        assert_eq!(
            response.form_errors("username"),
            ["Пользователь с таким именем уже существует."]
        );
    }

    #[tokio::test]
    async fn mismatched_passwords_are_rejected() {
        let app = TestApp::new();
        let response = app
            .client()
            .post_form(
                "/auth/signup/",
                &[
                    ("username", "newuser"),
                    ("password1", "one"),
                    ("password2", "two"),
                ],
            )
            .await;

        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(
            response.form_errors("password2"),
            ["Введенные пароли не совпадают."]
        );
    }
}
