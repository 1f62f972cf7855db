//! Postgres-backed stores.
//!
//! Every query is scoped, sorted and paginated in SQL. The `ORDER BY` column
//! is interpolated from the closed [`ProductSortField`] allow-list, never
//! from caller input, so the interpolation cannot be abused. The store traits
//! are synchronous; a store-owned current-thread runtime bridges onto the
//! async pool.

use sqlx::Row;
use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};

use selectshop_core::{
    AssociationId, FolderId, Page, PageRequest, ProductId, UserId,
};
use selectshop_products::{Folder, Product, ProductFolder, ProductSortField};

use super::{FolderStore, ProductFolderStore, ProductStore, StoreError};

/// Conventional relational schema; applied idempotently by [`PostgresStore::migrate`].
const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS product (
    id           UUID PRIMARY KEY,
    title        TEXT NOT NULL,
    link         TEXT NOT NULL,
    image        TEXT NOT NULL,
    lowest_price BIGINT NOT NULL,
    my_price     BIGINT NOT NULL,
    user_id      UUID NOT NULL,
    created_at   TIMESTAMPTZ NOT NULL,
    updated_at   TIMESTAMPTZ NOT NULL
);
CREATE INDEX IF NOT EXISTS product_user_idx ON product (user_id);

CREATE TABLE IF NOT EXISTS folder (
    id      UUID PRIMARY KEY,
    name    TEXT NOT NULL,
    user_id UUID NOT NULL
);
CREATE INDEX IF NOT EXISTS folder_user_idx ON folder (user_id);

CREATE TABLE IF NOT EXISTS product_folder (
    id         UUID PRIMARY KEY,
    product_id UUID NOT NULL REFERENCES product (id),
    folder_id  UUID NOT NULL REFERENCES folder (id),
    created_at TIMESTAMPTZ NOT NULL
);
CREATE INDEX IF NOT EXISTS product_folder_pair_idx ON product_folder (product_id, folder_id);
"#;

/// Postgres backing for all three stores.
pub struct PostgresStore {
    pool: PgPool,
    runtime: tokio::runtime::Runtime,
}

impl PostgresStore {
    /// Connect a small pool. The rule layer is single-request; five
    /// connections cover a worker comfortably.
    pub fn connect(database_url: &str) -> Result<Self, StoreError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| StoreError::Database(format!("runtime: {e}")))?;
        let pool = runtime
            .block_on(
                PgPoolOptions::new()
                    .max_connections(5)
                    .connect(database_url),
            )
            .map_err(|e| StoreError::Database(e.to_string()))?;
        Ok(Self { pool, runtime })
    }

    /// Apply the schema idempotently.
    pub fn migrate(&self) -> Result<(), StoreError> {
        self.run(async {
            let mut tx = self.pool.begin().await?;
            for statement in SCHEMA.split(';').filter(|s| !s.trim().is_empty()) {
                sqlx::query(statement).execute(&mut *tx).await?;
            }
            tx.commit().await?;
            Ok(())
        })
    }

    fn run<T>(
        &self,
        fut: impl Future<Output = Result<T, sqlx::Error>>,
    ) -> Result<T, StoreError> {
        self.runtime.block_on(fut).map_err(|e| {
            tracing::error!("postgres store failure: {e}");
            StoreError::Database(e.to_string())
        })
    }
}

fn product_from_row(row: &PgRow) -> Result<Product, sqlx::Error> {
    Ok(Product {
        id: ProductId::from_uuid(row.try_get("id")?),
        title: row.try_get("title")?,
        link: row.try_get("link")?,
        image: row.try_get("image")?,
        lowest_price: row.try_get("lowest_price")?,
        my_price: row.try_get("my_price")?,
        user_id: UserId::from_uuid(row.try_get("user_id")?),
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

fn folder_from_row(row: &PgRow) -> Result<Folder, sqlx::Error> {
    Ok(Folder {
        id: FolderId::from_uuid(row.try_get("id")?),
        name: row.try_get("name")?,
        user_id: UserId::from_uuid(row.try_get("user_id")?),
    })
}

fn association_from_row(row: &PgRow) -> Result<ProductFolder, sqlx::Error> {
    Ok(ProductFolder {
        id: AssociationId::from_uuid(row.try_get("id")?),
        product_id: ProductId::from_uuid(row.try_get("product_id")?),
        folder_id: FolderId::from_uuid(row.try_get("folder_id")?),
        created_at: row.try_get("created_at")?,
    })
}

/// `qualifier` prefixes column names ("p." in joined queries, "" otherwise).
fn order_clause(page: &PageRequest<ProductSortField>, qualifier: &str) -> String {
    let direction = if page.ascending { "ASC" } else { "DESC" };
    // Tie-break on id so paging is stable across requests.
    format!(
        "ORDER BY {qualifier}{} {direction}, {qualifier}id ASC",
        page.sort_by.column()
    )
}

impl ProductStore for PostgresStore {
    fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, StoreError> {
        self.run(async {
            let row = sqlx::query("SELECT * FROM product WHERE id = $1")
                .bind(id.as_uuid())
                .fetch_optional(&self.pool)
                .await?;
            row.as_ref().map(product_from_row).transpose()
        })
    }

    fn save(&self, product: Product) -> Result<Product, StoreError> {
        self.run(async {
            sqlx::query(
                r#"
                INSERT INTO product
                    (id, title, link, image, lowest_price, my_price, user_id, created_at, updated_at)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
                ON CONFLICT (id) DO UPDATE SET
                    title = EXCLUDED.title,
                    link = EXCLUDED.link,
                    image = EXCLUDED.image,
                    lowest_price = EXCLUDED.lowest_price,
                    my_price = EXCLUDED.my_price,
                    updated_at = EXCLUDED.updated_at
                "#,
            )
            .bind(product.id.as_uuid())
            .bind(&product.title)
            .bind(&product.link)
            .bind(&product.image)
            .bind(product.lowest_price)
            .bind(product.my_price)
            .bind(product.user_id.as_uuid())
            .bind(product.created_at)
            .bind(product.updated_at)
            .execute(&self.pool)
            .await?;
            Ok(product)
        })
    }

    fn find_all(&self, page: &PageRequest<ProductSortField>) -> Result<Page<Product>, StoreError> {
        self.run(async {
            let total: i64 = sqlx::query("SELECT COUNT(*) AS n FROM product")
                .fetch_one(&self.pool)
                .await?
                .try_get("n")?;

            let sql = format!(
                "SELECT * FROM product {} LIMIT $1 OFFSET $2",
                order_clause(page, "")
            );
            let rows = sqlx::query(&sql)
                .bind(page.limit() as i64)
                .bind(page.offset() as i64)
                .fetch_all(&self.pool)
                .await?;
            let items = rows
                .iter()
                .map(product_from_row)
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Page::new(items, page.page, page.size, total as u64))
        })
    }

    fn find_all_by_user(
        &self,
        user_id: UserId,
        page: &PageRequest<ProductSortField>,
    ) -> Result<Page<Product>, StoreError> {
        self.run(async {
            let total: i64 = sqlx::query("SELECT COUNT(*) AS n FROM product WHERE user_id = $1")
                .bind(user_id.as_uuid())
                .fetch_one(&self.pool)
                .await?
                .try_get("n")?;

            let sql = format!(
                "SELECT * FROM product WHERE user_id = $1 {} LIMIT $2 OFFSET $3",
                order_clause(page, "")
            );
            let rows = sqlx::query(&sql)
                .bind(user_id.as_uuid())
                .bind(page.limit() as i64)
                .bind(page.offset() as i64)
                .fetch_all(&self.pool)
                .await?;
            let items = rows
                .iter()
                .map(product_from_row)
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Page::new(items, page.page, page.size, total as u64))
        })
    }

    fn find_all_by_user_and_folder(
        &self,
        user_id: UserId,
        folder_id: FolderId,
        page: &PageRequest<ProductSortField>,
    ) -> Result<Page<Product>, StoreError> {
        self.run(async {
            let total: i64 = sqlx::query(
                r#"
                SELECT COUNT(*) AS n
                FROM product p
                JOIN product_folder pf ON pf.product_id = p.id
                WHERE p.user_id = $1 AND pf.folder_id = $2
                "#,
            )
            .bind(user_id.as_uuid())
            .bind(folder_id.as_uuid())
            .fetch_one(&self.pool)
            .await?
            .try_get("n")?;

            let sql = format!(
                r#"
                SELECT p.*
                FROM product p
                JOIN product_folder pf ON pf.product_id = p.id
                WHERE p.user_id = $1 AND pf.folder_id = $2
                {}
                LIMIT $3 OFFSET $4
                "#,
                order_clause(page, "p.")
            );
            let rows = sqlx::query(&sql)
                .bind(user_id.as_uuid())
                .bind(folder_id.as_uuid())
                .bind(page.limit() as i64)
                .bind(page.offset() as i64)
                .fetch_all(&self.pool)
                .await?;
            let items = rows
                .iter()
                .map(product_from_row)
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Page::new(items, page.page, page.size, total as u64))
        })
    }

    fn all_ids(&self) -> Result<Vec<ProductId>, StoreError> {
        self.run(async {
            let rows = sqlx::query("SELECT id FROM product ORDER BY id")
                .fetch_all(&self.pool)
                .await?;
            rows.iter()
                .map(|row| Ok(ProductId::from_uuid(row.try_get("id")?)))
                .collect()
        })
    }
}

impl FolderStore for PostgresStore {
    fn find_by_id(&self, id: FolderId) -> Result<Option<Folder>, StoreError> {
        self.run(async {
            let row = sqlx::query("SELECT * FROM folder WHERE id = $1")
                .bind(id.as_uuid())
                .fetch_optional(&self.pool)
                .await?;
            row.as_ref().map(folder_from_row).transpose()
        })
    }

    fn save(&self, folder: Folder) -> Result<Folder, StoreError> {
        self.run(async {
            sqlx::query(
                r#"
                INSERT INTO folder (id, name, user_id)
                VALUES ($1, $2, $3)
                ON CONFLICT (id) DO UPDATE SET name = EXCLUDED.name
                "#,
            )
            .bind(folder.id.as_uuid())
            .bind(&folder.name)
            .bind(folder.user_id.as_uuid())
            .execute(&self.pool)
            .await?;
            Ok(folder)
        })
    }

    fn find_all_by_user(&self, user_id: UserId) -> Result<Vec<Folder>, StoreError> {
        self.run(async {
            let rows = sqlx::query("SELECT * FROM folder WHERE user_id = $1 ORDER BY id")
                .bind(user_id.as_uuid())
                .fetch_all(&self.pool)
                .await?;
            rows.iter().map(folder_from_row).collect()
        })
    }

    fn find_by_user_and_names(
        &self,
        user_id: UserId,
        names: &[String],
    ) -> Result<Vec<Folder>, StoreError> {
        self.run(async {
            let rows =
                sqlx::query("SELECT * FROM folder WHERE user_id = $1 AND name = ANY($2)")
                    .bind(user_id.as_uuid())
                    .bind(names)
                    .fetch_all(&self.pool)
                    .await?;
            rows.iter().map(folder_from_row).collect()
        })
    }
}

impl ProductFolderStore for PostgresStore {
    fn find_by_product_and_folder(
        &self,
        product_id: ProductId,
        folder_id: FolderId,
    ) -> Result<Option<ProductFolder>, StoreError> {
        self.run(async {
            let row = sqlx::query(
                "SELECT * FROM product_folder WHERE product_id = $1 AND folder_id = $2 LIMIT 1",
            )
            .bind(product_id.as_uuid())
            .bind(folder_id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;
            row.as_ref().map(association_from_row).transpose()
        })
    }

    fn save(&self, association: ProductFolder) -> Result<ProductFolder, StoreError> {
        self.run(async {
            sqlx::query(
                r#"
                INSERT INTO product_folder (id, product_id, folder_id, created_at)
                VALUES ($1, $2, $3, $4)
                "#,
            )
            .bind(association.id.as_uuid())
            .bind(association.product_id.as_uuid())
            .bind(association.folder_id.as_uuid())
            .bind(association.created_at)
            .execute(&self.pool)
            .await?;
            Ok(association)
        })
    }

    fn find_all_by_product(&self, product_id: ProductId) -> Result<Vec<ProductFolder>, StoreError> {
        self.run(async {
            let rows = sqlx::query("SELECT * FROM product_folder WHERE product_id = $1")
                .bind(product_id.as_uuid())
                .fetch_all(&self.pool)
                .await?;
            rows.iter().map(association_from_row).collect()
        })
    }
}
