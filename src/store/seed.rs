//! One-time database seeding: drops and recreates the schema, then inserts
//! fixture rows. Destructive; the HTTP endpoint that exposes it is compiled
//! behind the `seed-api` feature and must stay out of production builds.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::Serialize;
use sqlx::PgPool;
use utoipa::ToSchema;
use uuid::{Uuid, uuid};

use crate::auth::hash_password;

/// Row counts inserted by a seed run
#[derive(Debug, Serialize, ToSchema)]
pub struct SeedSummary {
    pub users: usize,
    pub customers: usize,
    pub invoices: usize,
    pub revenue: usize,
}

struct UserFixture {
    id: Uuid,
    name: &'static str,
    email: &'static str,
    password: &'static str,
}

struct CustomerFixture {
    id: Uuid,
    name: &'static str,
    email: &'static str,
    image_url: &'static str,
}

struct InvoiceFixture {
    /// Index into [`CUSTOMERS`]
    customer: usize,
    amount_cents: i32,
    status: &'static str,
    date: (i32, u32, u32),
}

const USERS: &[UserFixture] = &[UserFixture {
    id: uuid!("410544b2-4001-4271-9855-fec4b6a6442a"),
    name: "User",
    email: "user@nextmail.com",
    password: "123456",
}];

const CUSTOMERS: &[CustomerFixture] = &[
    CustomerFixture {
        id: uuid!("d6e15727-9fe1-4961-8c5b-ea44a9bd81aa"),
        name: "Evil Rabbit",
        email: "evil@rabbit.com",
        image_url: "/customers/evil-rabbit.png",
    },
    CustomerFixture {
        id: uuid!("3958dc9e-712f-4377-85e9-fec4b6a6442a"),
        name: "Delba de Oliveira",
        email: "delba@oliveira.com",
        image_url: "/customers/delba-de-oliveira.png",
    },
    CustomerFixture {
        id: uuid!("3958dc9e-742f-4377-85e9-fec4b6a6442a"),
        name: "Lee Robinson",
        email: "lee@robinson.com",
        image_url: "/customers/lee-robinson.png",
    },
    CustomerFixture {
        id: uuid!("76d65c26-f784-44a2-ac19-586678f7c2f2"),
        name: "Michael Novotny",
        email: "michael@novotny.com",
        image_url: "/customers/michael-novotny.png",
    },
    CustomerFixture {
        id: uuid!("cc27c14a-0acf-4f4a-a6c9-d45682c144b9"),
        name: "Amy Burns",
        email: "amy@burns.com",
        image_url: "/customers/amy-burns.png",
    },
    CustomerFixture {
        id: uuid!("13d07535-c59e-4157-a011-f8d2ef4e0cbb"),
        name: "Balazs Orban",
        email: "balazs@orban.com",
        image_url: "/customers/balazs-orban.png",
    },
];

const INVOICES: &[InvoiceFixture] = &[
    InvoiceFixture { customer: 0, amount_cents: 15795, status: "pending", date: (2022, 12, 6) },
    InvoiceFixture { customer: 1, amount_cents: 20348, status: "pending", date: (2022, 11, 14) },
    InvoiceFixture { customer: 4, amount_cents: 3040, status: "paid", date: (2022, 10, 29) },
    InvoiceFixture { customer: 3, amount_cents: 44800, status: "paid", date: (2023, 9, 10) },
    InvoiceFixture { customer: 5, amount_cents: 34577, status: "pending", date: (2023, 8, 5) },
    InvoiceFixture { customer: 2, amount_cents: 54246, status: "pending", date: (2023, 7, 16) },
    InvoiceFixture { customer: 0, amount_cents: 666, status: "pending", date: (2023, 6, 27) },
    InvoiceFixture { customer: 3, amount_cents: 32545, status: "paid", date: (2023, 6, 9) },
    InvoiceFixture { customer: 4, amount_cents: 1250, status: "paid", date: (2023, 6, 17) },
    InvoiceFixture { customer: 5, amount_cents: 8546, status: "paid", date: (2023, 6, 7) },
    InvoiceFixture { customer: 1, amount_cents: 500, status: "paid", date: (2023, 8, 19) },
    InvoiceFixture { customer: 5, amount_cents: 8945, status: "paid", date: (2023, 6, 3) },
    InvoiceFixture { customer: 2, amount_cents: 1000, status: "paid", date: (2022, 6, 5) },
];

const REVENUE: &[(&str, i32)] = &[
    ("Jan", 2000),
    ("Feb", 1800),
    ("Mar", 2200),
    ("Apr", 2500),
    ("May", 2300),
    ("Jun", 3200),
    ("Jul", 3500),
    ("Aug", 3700),
    ("Sep", 2500),
    ("Oct", 2800),
    ("Nov", 3000),
    ("Dec", 4800),
];

/// Drop and recreate all four tables, then insert the fixture rows.
/// Running it twice leaves the database in the same state both times.
pub async fn run(pool: &PgPool) -> Result<SeedSummary> {
    sqlx::query(r#"CREATE EXTENSION IF NOT EXISTS "uuid-ossp""#)
        .execute(pool)
        .await
        .context("Failed to enable uuid extension")?;

    for table in ["invoices", "customers", "revenue", "users"] {
        sqlx::query(&format!("DROP TABLE IF EXISTS {}", table))
            .execute(pool)
            .await
            .with_context(|| format!("Failed to drop table {}", table))?;
    }

    sqlx::query(
        r#"CREATE TABLE users (
               id UUID PRIMARY KEY,
               name TEXT NOT NULL,
               email TEXT NOT NULL UNIQUE,
               password TEXT NOT NULL
           )"#,
    )
    .execute(pool)
    .await
    .context("Failed to create users table")?;

    for user in USERS {
        let hashed = hash_password(user.password).context("Failed to hash fixture password")?;
        sqlx::query("INSERT INTO users (id, name, email, password) VALUES ($1, $2, $3, $4)")
            .bind(user.id)
            .bind(user.name)
            .bind(user.email)
            .bind(&hashed)
            .execute(pool)
            .await
            .context("Failed to insert user fixture")?;
    }

    sqlx::query(
        r#"CREATE TABLE customers (
               id UUID PRIMARY KEY,
               name TEXT NOT NULL,
               email TEXT NOT NULL,
               image_url TEXT NOT NULL
           )"#,
    )
    .execute(pool)
    .await
    .context("Failed to create customers table")?;

    for customer in CUSTOMERS {
        sqlx::query("INSERT INTO customers (id, name, email, image_url) VALUES ($1, $2, $3, $4)")
            .bind(customer.id)
            .bind(customer.name)
            .bind(customer.email)
            .bind(customer.image_url)
            .execute(pool)
            .await
            .context("Failed to insert customer fixture")?;
    }

    sqlx::query(
        r#"CREATE TABLE invoices (
               id UUID DEFAULT uuid_generate_v4() PRIMARY KEY,
               customer_id UUID NOT NULL,
               amount INT NOT NULL,
               status TEXT NOT NULL,
               date DATE NOT NULL
           )"#,
    )
    .execute(pool)
    .await
    .context("Failed to create invoices table")?;

    for invoice in INVOICES {
        let (y, m, d) = invoice.date;
        let date = NaiveDate::from_ymd_opt(y, m, d).expect("valid fixture date");
        sqlx::query(
            "INSERT INTO invoices (customer_id, amount, status, date) VALUES ($1, $2, $3, $4)",
        )
        .bind(CUSTOMERS[invoice.customer].id)
        .bind(invoice.amount_cents)
        .bind(invoice.status)
        .bind(date)
        .execute(pool)
        .await
        .context("Failed to insert invoice fixture")?;
    }

    sqlx::query(
        r#"CREATE TABLE revenue (
               month TEXT PRIMARY KEY,
               revenue INT NOT NULL
           )"#,
    )
    .execute(pool)
    .await
    .context("Failed to create revenue table")?;

    for (month, revenue) in REVENUE {
        sqlx::query("INSERT INTO revenue (month, revenue) VALUES ($1, $2)")
            .bind(month)
            .bind(revenue)
            .execute(pool)
            .await
            .context("Failed to insert revenue fixture")?;
    }

    tracing::info!(
        users = USERS.len(),
        customers = CUSTOMERS.len(),
        invoices = INVOICES.len(),
        revenue = REVENUE.len(),
        "database seeded"
    );

    Ok(SeedSummary {
        users: USERS.len(),
        customers: CUSTOMERS.len(),
        invoices: INVOICES.len(),
        revenue: REVENUE.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::models::InvoiceStatus;
    use std::collections::HashSet;

    #[test]
    fn test_fixture_statuses_are_valid() {
        for invoice in INVOICES {
            assert!(
                invoice.status.parse::<InvoiceStatus>().is_ok(),
                "fixture status {:?}",
                invoice.status
            );
        }
    }

    #[test]
    fn test_fixture_amounts_positive() {
        for invoice in INVOICES {
            assert!(invoice.amount_cents > 0);
        }
    }

    #[test]
    fn test_fixture_customer_references_resolve() {
        for invoice in INVOICES {
            assert!(invoice.customer < CUSTOMERS.len());
        }
    }

    #[test]
    fn test_fixture_dates_are_valid() {
        for invoice in INVOICES {
            let (y, m, d) = invoice.date;
            assert!(NaiveDate::from_ymd_opt(y, m, d).is_some());
        }
    }

    #[test]
    fn test_fixture_ids_unique() {
        let ids: HashSet<Uuid> = CUSTOMERS.iter().map(|c| c.id).collect();
        assert_eq!(ids.len(), CUSTOMERS.len());

        let emails: HashSet<&str> = USERS.iter().map(|u| u.email).collect();
        assert_eq!(emails.len(), USERS.len());
    }

    #[test]
    fn test_revenue_covers_twelve_unique_months() {
        let months: HashSet<&str> = REVENUE.iter().map(|(m, _)| *m).collect();
        assert_eq!(months.len(), 12);
    }
}
