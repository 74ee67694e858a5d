//! Hotel reservations repository

use async_trait::async_trait;
use sqlx::{Pool, Postgres, QueryBuilder};

use crate::{
    error::{AppError, AppResult},
    models::reservation::{NewReservation, ReservationRecord, ReservationRow},
};

use super::ReservationStore;

#[derive(Clone)]
pub struct ReservationsRepository {
    pool: Pool<Postgres>,
}

impl ReservationsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

fn column_count(value: u32, field: &str) -> AppResult<i32> {
    i32::try_from(value)
        .map_err(|_| AppError::Validation(format!("{} count {} is out of range", field, value)))
}

#[async_trait]
impl ReservationStore for ReservationsRepository {
    async fn insert_all(&self, records: &[NewReservation], batch_size: usize) -> AppResult<u64> {
        if records.is_empty() {
            return Ok(0);
        }

        let mut tx = self.pool.begin().await?;
        let mut inserted = 0;

        for batch in records.chunks(batch_size.max(1)) {
            let mut rows = Vec::with_capacity(batch.len());
            for record in batch {
                rows.push((
                    record,
                    column_count(record.adults, "adults")?,
                    column_count(record.children, "children")?,
                    column_count(record.babies, "babies")?,
                ));
            }

            let mut builder = QueryBuilder::<Postgres>::new(
                "INSERT INTO hotel_reservations (hotel_name, arrival_date, adults, children, babies, country) ",
            );
            builder.push_values(rows, |mut b, (record, adults, children, babies)| {
                b.push_bind(record.hotel_name.clone())
                    .push_bind(record.arrival_date)
                    .push_bind(adults)
                    .push_bind(children)
                    .push_bind(babies)
                    .push_bind(record.country.clone());
            });

            inserted += builder.build().execute(&mut *tx).await?.rows_affected();
        }

        // Dropping `tx` on an early return rolls the whole load back
        tx.commit().await?;
        tracing::debug!(inserted, "Committed reservation load");
        Ok(inserted)
    }

    async fn find_all(&self) -> AppResult<Vec<ReservationRecord>> {
        let rows = sqlx::query_as::<_, ReservationRow>(
            r#"
            SELECT id, hotel_name, arrival_date, adults, children, babies, country
            FROM hotel_reservations
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(ReservationRecord::try_from).collect()
    }

    async fn count(&self) -> AppResult<i64> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM hotel_reservations")
            .fetch_one(&self.pool)
            .await?;
        Ok(total)
    }

    async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
