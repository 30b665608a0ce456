//! Menu resolution and order validation against the sample fixtures in `config/`.

use std::path::PathBuf;
use std::sync::Arc;

use meta_core::repositories::UserRepository;
use meta_core::services::{evaluate, resume, ActionHandler, ChainState, MenuContext, MenuService};
use meta_core::{ActionValidate, MenuItem, TagValue, User};
use meta_infrastructure::{
    JsonFixtureRepository, JsonMessageBundle, RoleBasedPermissionResolver, ScriptEvaluator,
    ScriptTagResolver,
};
use meta_script::Bindings;
use serde_json::Value;

fn config_path(relative: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../config").join(relative)
}

async fn fixture() -> Arc<JsonFixtureRepository> {
    Arc::new(
        JsonFixtureRepository::load(config_path("fixtures/menus.json"))
            .await
            .unwrap(),
    )
}

async fn menus_for(code: &str, locale: &str) -> Vec<MenuItem> {
    let repo = fixture().await;
    let user: User = repo.find_by_code(code).await.unwrap().unwrap();

    let mut bindings = Bindings::new();
    bindings.insert("__user__".into(), user.to_binding());
    let tags = ScriptTagResolver::new(Arc::new(repo.counter())).with_bindings(bindings);

    let service = MenuService::new(
        repo.clone(),
        repo,
        Arc::new(RoleBasedPermissionResolver::new(
            "admin",
            "admins",
            ["base", "sale", "crm"],
        )),
        Arc::new(ScriptEvaluator::new()),
        Arc::new(tags),
    );

    service
        .get_menus(Some(&user), &MenuContext::new(locale))
        .await
        .unwrap()
}

fn names(items: &[MenuItem]) -> Vec<&str> {
    items.iter().map(|i| i.name.as_str()).collect()
}

#[tokio::test]
async fn sales_user_menus() {
    let items = menus_for("jdoe", "fr-CA").await;

    assert_eq!(
        names(&items),
        vec!["menu-sales-orders", "menu-sales-quotes", "menu-sales", "menu-reports"]
    );

    let orders = &items[0];
    assert_eq!(orders.parent.as_deref(), Some("menu-sales"));
    assert_eq!(orders.tag, Some(TagValue::Count(12)));
    assert_eq!(orders.help.as_deref(), Some("Bons de commande"));
    assert_eq!(items[1].tag, Some(TagValue::Count(1)));
    assert_eq!(items[2].help.as_deref(), Some("Devis et commandes"));
    assert!(items[3].mobile);
}

#[tokio::test]
async fn administrator_menus() {
    let items = menus_for("admin", "en").await;

    assert_eq!(
        names(&items),
        vec![
            "menu-crm-leads",
            "menu-sales-orders",
            "menu-admin-users",
            "menu-sales-quotes",
            "menu-crm",
            "menu-sales",
            "menu-admin",
        ]
    );
    assert_eq!(items[5].help.as_deref(), Some("Quotations and sale orders"));
}

#[tokio::test]
async fn group_roles_and_no_help() {
    let items = menus_for("asmith", "en").await;

    assert_eq!(
        names(&items),
        vec![
            "menu-crm-leads",
            "menu-sales-orders",
            "menu-sales-quotes",
            "menu-crm",
            "menu-sales",
        ]
    );
    assert!(items.iter().all(|i| i.help.is_none()));
}

#[tokio::test]
async fn inactive_user_is_not_found() {
    let repo = fixture().await;
    assert!(repo.find_by_code("former").await.unwrap().is_none());
}

async fn order_chain() -> (ActionValidate, Bindings) {
    let raw = tokio::fs::read_to_string(config_path("chains/validate-order.json"))
        .await
        .unwrap();
    let chain: ActionValidate = serde_json::from_str(&raw).unwrap();
    chain.check().unwrap();

    let raw = tokio::fs::read_to_string(config_path("chains/order-context.json"))
        .await
        .unwrap();
    let context = match serde_json::from_str(&raw).unwrap() {
        Value::Object(map) => map,
        other => panic!("context must be an object, got {}", other),
    };
    (chain, context)
}

#[tokio::test]
async fn order_chain_suspends_then_completes() {
    let (chain, context) = order_chain().await;
    let messages = JsonMessageBundle::load(config_path("fixtures/messages.json"), "fr")
        .await
        .unwrap();
    let script = ScriptEvaluator::new();
    let handler = ActionHandler::new(context, &messages, &script);

    let first = evaluate(&chain, 0, &handler).unwrap().unwrap();
    let json = serde_json::to_value(&first).unwrap();
    assert_eq!(
        json["alert"]["message"],
        "Le total de la commande dépasse la limite de crédit"
    );
    assert_eq!(json["alert"]["title"], "Contrôle de crédit");
    assert_eq!(json["notify"][0]["message"], "Checking order SO-0042 of ACME");
    assert_eq!(json["pending"], "action-validate-order[3]");

    let token = first.pending().unwrap().clone();
    let second = resume(&chain, &token, &handler).unwrap().unwrap();
    assert_eq!(second.state, ChainState::Completed);
    assert_eq!(
        second.info.unwrap().message,
        "Order SO-0042 is ready to confirm"
    );
}
