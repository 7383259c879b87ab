//! Admin screens and the public view driven through `HttpApi` against a live router.

use chrono::Utc;
use folio::client::{Experiences, Messages, Projects, Skills};
use folio::models::{ContactDraft, SkillCategory};
use folio::view::display::period;
use folio::view::forms::{ExperienceForm, ProfileForm, ProjectForm, SkillForm};
use folio::view::{ContactForm, ManagerScreen, MessagesScreen, PortfolioView, ProfileScreen, Section};
use folio::{app, bundled_config, resolve, AppState, HttpApi, MemoryStore};
use std::sync::Arc;
use tokio::net::TcpListener;

async fn serve(token: Option<&str>) -> String {
    let model = resolve(&bundled_config().unwrap()).unwrap();
    let state = AppState::new(Arc::new(MemoryStore::new()), model).with_admin_token(token.map(str::to_string));
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app(state, 1024 * 1024)).await.unwrap();
    });
    format!("http://{}", addr)
}

#[tokio::test]
async fn skill_screen_create_edit_delete() {
    let api = HttpApi::new(serve(None).await);
    let mut screen = ManagerScreen::<Skills>::new();
    screen.refresh(&api).await;
    assert!(screen.items.is_empty());

    screen.open_new();
    assert!(screen.dialog_open);
    screen.form = SkillForm {
        name: "Rust".into(),
        category: SkillCategory::Backend.to_string(),
        icon: "cpu".into(),
        order_index: 1,
    };
    let notice = screen.submit(&api).await;
    assert!(notice.is_success());
    assert_eq!(notice.text, "Skill created successfully");
    assert!(!screen.dialog_open);
    assert_eq!(screen.items.len(), 1);

    let row = screen.items[0].clone();
    screen.edit(&row);
    assert_eq!(screen.editing, Some(row.id));
    screen.form.name = "Rust (async)".into();
    let notice = screen.submit(&api).await;
    assert_eq!(notice.text, "Skill updated successfully");
    assert_eq!(screen.items[0].name, "Rust (async)");
    assert_eq!(screen.items[0].category, "Backend");

    let notice = screen.delete(&api, &row.id).await;
    assert_eq!(notice.text, "Skill deleted successfully");
    assert!(screen.items.is_empty());

    // Deleting again is still a success.
    let notice = screen.delete(&api, &row.id).await;
    assert!(notice.is_success());
}

#[tokio::test]
async fn failed_save_keeps_dialog_open() {
    let api = HttpApi::new(serve(None).await);
    let mut screen = ManagerScreen::<Projects>::new();
    screen.open_new();
    screen.form.title = "No description".into();
    let notice = screen.submit(&api).await;
    assert!(!notice.is_success());
    assert_eq!(notice.text, "Failed to save project");
    assert!(screen.dialog_open);
    assert_eq!(screen.form.title, "No description");
}

#[tokio::test]
async fn project_technologies_are_split() {
    let api = HttpApi::new(serve(None).await);
    let mut screen = ManagerScreen::<Projects>::new();
    screen.open_new();
    screen.form = ProjectForm {
        title: "Portfolio".into(),
        description: "This site".into(),
        technologies: "React, TypeScript,  Tailwind ".into(),
        featured: true,
        ..Default::default()
    };
    screen.submit(&api).await;
    assert_eq!(screen.items[0].technologies, ["React", "TypeScript", "Tailwind"]);
    assert!(screen.items[0].featured);
}

#[tokio::test]
async fn experience_end_date_switches_between_ongoing_and_bounded() {
    let api = HttpApi::new(serve(None).await);
    let mut screen = ManagerScreen::<Experiences>::new();
    screen.open_new();
    screen.form = ExperienceForm {
        company: "Acme".into(),
        position: "Engineer".into(),
        description: "Built things".into(),
        start_date: "2020-01-15".into(),
        ..Default::default()
    };
    screen.submit(&api).await;
    let exp = screen.items[0].clone();
    assert!(exp.is_ongoing());
    assert_eq!(period(&exp), "Jan 2020 - Present");

    screen.edit(&exp);
    screen.form.end_date = "2022-03-01".into();
    screen.submit(&api).await;
    assert!(!screen.items[0].is_ongoing());
    assert_eq!(period(&screen.items[0]), "Jan 2020 - Mar 2022");
}

#[tokio::test]
async fn malformed_end_date_keeps_the_dialog_open() {
    let api = HttpApi::new(serve(None).await);
    let mut screen = ManagerScreen::<Experiences>::new();
    screen.open_new();
    screen.form = ExperienceForm {
        company: "Acme".into(),
        position: "Engineer".into(),
        description: "Built things".into(),
        start_date: "2020-01-15".into(),
        end_date: "2022-03-01".into(),
        ..Default::default()
    };
    screen.submit(&api).await;
    let exp = screen.items[0].clone();

    screen.edit(&exp);
    screen.form.end_date = "2022-13-01".into();
    let notice = screen.submit(&api).await;
    assert!(!notice.is_success());
    assert_eq!(notice.text, "end_date must be a date (YYYY-MM-DD), got \"2022-13-01\"");
    assert!(screen.dialog_open);
    assert_eq!(screen.editing, Some(exp.id));

    screen.refresh(&api).await;
    assert!(!screen.items[0].is_ongoing());
    assert_eq!(period(&screen.items[0]), "Jan 2020 - Mar 2022");
}

#[tokio::test]
async fn unknown_skill_category_survives_an_edit() {
    let api = HttpApi::new(serve(None).await);
    api.create::<Skills>(&folio::models::SkillDraft {
        name: "Qiskit".into(),
        category: "Quantum".into(),
        icon: None,
        order_index: 0,
    })
    .await
    .unwrap();

    let mut screen = ManagerScreen::<Skills>::new();
    screen.refresh(&api).await;
    let row = screen.items[0].clone();
    screen.edit(&row);
    screen.form.name = "Qiskit SDK".into();
    screen.submit(&api).await;
    assert_eq!(screen.items[0].name, "Qiskit SDK");
    assert_eq!(screen.items[0].category, "Quantum");
}

#[tokio::test]
async fn profile_screen_creates_then_updates_the_singleton() {
    let api = HttpApi::new(serve(None).await);
    let mut screen = ProfileScreen::new();
    screen.load(&api).await;
    assert!(screen.profile.is_none());

    screen.form = ProfileForm {
        email: "ada@example.com".into(),
        full_name: "Ada Lovelace".into(),
        ..Default::default()
    };
    let notice = screen.save(&api).await;
    assert_eq!(notice.text, "Profile saved successfully");
    let first_id = screen.profile.as_ref().unwrap().id;

    screen.form.bio = "First programmer".into();
    screen.save(&api).await;

    let mut reloaded = ProfileScreen::new();
    reloaded.load(&api).await;
    let profile = reloaded.profile.unwrap();
    assert_eq!(profile.id, first_id);
    assert_eq!(profile.bio.as_deref(), Some("First programmer"));
    assert_eq!(reloaded.form.full_name, "Ada Lovelace");
}

#[tokio::test]
async fn contact_message_round_trip() {
    let api = HttpApi::new(serve(None).await);
    let mut form = ContactForm {
        draft: ContactDraft {
            name: "Ada".into(),
            email: "ada@example.com".into(),
            subject: Some("Hello".into()),
            message: "Nice site".into(),
        },
    };
    let notice = form.submit(&api).await;
    assert_eq!(notice.text, "Message sent successfully! I will get back to you soon.");
    assert_eq!(form.draft, ContactDraft::default());

    let notice = form.submit(&api).await;
    assert_eq!(notice.text, "Failed to send message. Please try again.");

    let mut inbox = MessagesScreen::new();
    inbox.refresh(&api).await;
    assert_eq!(inbox.messages.len(), 1);
    assert_eq!(inbox.unread_count(), 1);
    let id = inbox.messages[0].id;

    let notice = inbox.toggle_read(&api, &id).await;
    assert_eq!(notice.text, "Message marked as read");
    assert!(inbox.messages[0].read);
    assert_eq!(inbox.messages[0].message, "Nice site");
    assert_eq!(inbox.unread_count(), 0);

    let notice = inbox.toggle_read(&api, &id).await;
    assert_eq!(notice.text, "Message marked as unread");
    assert!(!inbox.messages[0].read);

    let notice = inbox.delete(&api, &id).await;
    assert_eq!(notice.text, "Message deleted successfully");
    assert!(inbox.messages.is_empty());
}

#[tokio::test]
async fn guarded_server_needs_the_token_for_admin_screens() {
    let base = serve(Some("s3cret")).await;
    let anonymous = HttpApi::new(base.clone());
    let admin = HttpApi::new(base).with_token("s3cret");

    let mut screen = ManagerScreen::<Skills>::new();
    screen.open_new();
    screen.form.name = "Rust".into();
    let notice = screen.submit(&anonymous).await;
    assert_eq!(notice.text, "Failed to save skill");

    let notice = screen.submit(&admin).await;
    assert!(notice.is_success());

    // Public reads still work without the token.
    screen.refresh(&anonymous).await;
    assert_eq!(screen.items.len(), 1);

    let mut inbox = MessagesScreen::new();
    inbox.refresh(&anonymous).await;
    assert!(inbox.messages.is_empty());
    let mut contact = ContactForm {
        draft: ContactDraft {
            name: "Ada".into(),
            email: "ada@example.com".into(),
            subject: None,
            message: "hi".into(),
        },
    };
    assert!(contact.submit(&anonymous).await.is_success());
    inbox.refresh(&admin).await;
    assert_eq!(inbox.messages.len(), 1);
    assert!(admin.list::<Messages>().await.is_ok());
}

#[tokio::test]
async fn public_view_loads_over_http() {
    let api = HttpApi::new(serve(None).await);
    let empty = PortfolioView::load(&api).await.unwrap();
    let page = empty.page(Utc::now());
    assert!(page.hero.is_none());
    assert!(!page.about.is_shown());

    let mut profile = ProfileScreen::new();
    profile.form.email = "ada@example.com".into();
    profile.form.full_name = "Ada Lovelace".into();
    profile.save(&api).await;
    let mut skills = ManagerScreen::<Skills>::new();
    skills.form.name = "Rust".into();
    skills.submit(&api).await;

    let view = PortfolioView::load(&api).await.unwrap();
    let page = view.page(Utc::now());
    assert!(page.about.is_shown());
    assert!(matches!(page.projects, Section::Empty { .. }));

    let served: serde_json::Value = api.get_json("portfolio").await.unwrap();
    assert_eq!(served["profile"]["full_name"], "Ada Lovelace");
    assert_eq!(served["skills"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn unreachable_server_degrades_to_empty_view() {
    let api = HttpApi::new("http://127.0.0.1:9");
    let view = PortfolioView::load_or_empty(&api).await;
    assert_eq!(view, PortfolioView::default());

    let mut screen = ManagerScreen::<Skills>::new();
    screen.refresh(&api).await;
    assert!(screen.items.is_empty());
}
