//! Seed the database with demo data for local development.
//!
//! Inserts two members, a small catalog, two coupon policies, and one
//! instance of each coupon for the first member. Running it twice inserts
//! the data twice; it is a convenience for fresh local databases, not a
//! fixture manager.

use sqlx::PgPool;
use tracing::info;

use cart_api::db;

struct DemoProduct {
    name: &'static str,
    image_url: &'static str,
    price: i64,
}

const DEMO_PRODUCTS: &[DemoProduct] = &[
    DemoProduct {
        name: "Chicken",
        image_url: "https://images.example.com/chicken.jpg",
        price: 10_000,
    },
    DemoProduct {
        name: "Salad",
        image_url: "https://images.example.com/salad.jpg",
        price: 2_000,
    },
    DemoProduct {
        name: "Pizza",
        image_url: "https://images.example.com/pizza.jpg",
        price: 13_000,
    },
];

/// Seed demo members, products, and coupons.
///
/// # Errors
///
/// Returns an error if `DATABASE_URL` is missing or any insert fails.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let database_url = super::database_url()?;

    info!("Connecting to database...");
    let pool = db::create_pool(&database_url).await?;

    seed_members(&pool).await?;
    seed_products(&pool).await?;
    seed_coupons(&pool).await?;

    info!("Seeding complete!");
    Ok(())
}

async fn seed_members(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO member (email, password) VALUES \
         ('a@a.com', '1234'), ('b@b.com', '1234') \
         ON CONFLICT (email) DO NOTHING",
    )
    .execute(pool)
    .await?;

    info!("Seeded members a@a.com / b@b.com (password 1234)");
    Ok(())
}

async fn seed_products(pool: &PgPool) -> Result<(), sqlx::Error> {
    for product in DEMO_PRODUCTS {
        sqlx::query("INSERT INTO product (name, image_url, price) VALUES ($1, $2, $3)")
            .bind(product.name)
            .bind(product.image_url)
            .bind(product.price)
            .execute(pool)
            .await?;
    }

    info!(count = DEMO_PRODUCTS.len(), "Seeded products");
    Ok(())
}

async fn seed_coupons(pool: &PgPool) -> Result<(), sqlx::Error> {
    let fixed_id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO coupon (name, policy_type, discount_value, minimum_price) \
         VALUES ('1000 won off', 'fixed', 1000, 10000) RETURNING id",
    )
    .fetch_one(pool)
    .await?;

    let percent_id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO coupon (name, policy_type, discount_value, minimum_price) \
         VALUES ('10% welcome discount', 'percent', 10, 0) RETURNING id",
    )
    .fetch_one(pool)
    .await?;

    // Issue both coupons to the first demo member.
    sqlx::query(
        "INSERT INTO member_coupon (member_id, coupon_id) \
         SELECT m.id, c.id FROM member m, coupon c \
         WHERE m.email = 'a@a.com' AND c.id IN ($1, $2)",
    )
    .bind(fixed_id)
    .bind(percent_id)
    .execute(pool)
    .await?;

    info!("Seeded coupons and issued them to a@a.com");
    Ok(())
}
