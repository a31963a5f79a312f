//! Demo driver: boots the store, seeds the starter catalog on first use,
//! generates today's random plan, and prints the menu plus shopping list.

use meal_buddy::config;
use meal_buddy::core::plan::PlanPreference;
use meal_buddy::errors::Result;
use meal_buddy::store::MealStore;

use dotenvy::dotenv;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file (non-fatal, env vars can be set externally)
    dotenv().ok();

    // 3. Initialize the database
    let db = config::database::create_connection().await?;
    config::database::create_tables(&db).await?;
    info!("Database initialized at {}", config::database::get_database_url());

    // 4. Seed the starter catalog on first use
    let store = MealStore::new(db);
    let seeded = store
        .seed_starter_recipes(&config::catalog::builtin_catalog()?)
        .await?;
    if seeded > 0 {
        info!("Seeded starter catalog with {} recipes", seeded);
    }

    // 5. Generate today's menu and print the shopping list
    let plan = store
        .generate_random_plan(1, PlanPreference::Mixed)
        .await?;
    for day in &plan {
        let main_name = day.main_dish.as_ref().map_or("-", |r| r.name.as_str());
        let side_name = day.side_dish.as_ref().map_or("-", |r| r.name.as_str());
        println!("{}: 主菜 {main_name} / 配菜 {side_name}", day.date);
    }

    println!("--- 购物清单 ---");
    for item in store.shopping_list().await? {
        println!("[ ] {} {}{}", item.name, item.amount, item.unit);
    }

    Ok(())
}
