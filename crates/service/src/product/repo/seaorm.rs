use sea_orm::{
    ActiveModelTrait, ActiveValue::{NotSet, Set, Unchanged}, ColumnTrait, DatabaseConnection, EntityTrait,
    ModelTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};
use tracing::debug;

use models::product;

use crate::errors::ServiceError;
use crate::pagination::PageRequest;
use crate::product::domain::{Product, ProductDraft, ProductId, ProductPage};
use crate::product::repository::ProductRepository;

/// SeaORM-backed repository implementation.
pub struct SeaOrmProductRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmProductRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

#[async_trait::async_trait]
impl ProductRepository for SeaOrmProductRepository {
    async fn get(&self, id: ProductId) -> Result<Option<Product>, ServiceError> {
        let found = product::Entity::find_by_id(id).one(&self.db).await?;
        Ok(found.map(Product::from))
    }

    async fn save(&self, draft: ProductDraft) -> Result<Product, ServiceError> {
        let saved = match draft.id {
            None => {
                product::ActiveModel { id: NotSet, category: Set(draft.category), name: Set(draft.name) }
                    .insert(&self.db)
                    .await?
            }
            Some(id) => {
                product::ActiveModel { id: Unchanged(id), category: Set(draft.category), name: Set(draft.name) }
                    .update(&self.db)
                    .await?
            }
        };
        Ok(saved.into())
    }

    async fn delete(&self, p: &Product) -> Result<(), ServiceError> {
        let model = product::Model { id: p.id, category: p.category.clone(), name: p.name.clone() };
        let res = model.delete(&self.db).await?;
        debug!(product_id = p.id, rows_affected = res.rows_affected, "deleted product row");
        Ok(())
    }

    async fn scan_by_category(&self, category: &str, page: PageRequest) -> Result<ProductPage, ServiceError> {
        let paginator = product::Entity::find()
            .filter(product::Column::Category.eq(category))
            .order_by_asc(product::Column::Category)
            .order_by_asc(product::Column::Id)
            .paginate(&self.db, page.size());
        let totals = paginator.num_items_and_pages().await?;
        let rows = paginator.fetch_page(page.page()).await?;
        Ok(ProductPage {
            items: rows.into_iter().map(Product::from).collect(),
            total_elements: totals.number_of_items,
            total_pages: totals.number_of_pages,
        })
    }

    async fn distinct_categories(&self) -> Result<Vec<String>, ServiceError> {
        let categories = product::Entity::find()
            .select_only()
            .column(product::Column::Category)
            .distinct()
            .order_by_asc(product::Column::Category)
            .into_tuple::<String>()
            .all(&self.db)
            .await?;
        Ok(categories)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::get_db;
    use uuid::Uuid;

    #[tokio::test]
    async fn seaorm_product_crud_and_scans() -> Result<(), anyhow::Error> {
        let Some(db) = get_db().await? else { return Ok(()) };
        let repo = SeaOrmProductRepository::new(db.clone());

        let category = format!("svc_seaorm_{}", Uuid::new_v4());
        let mut created = vec![];
        for i in 0..5 {
            created.push(repo.save(ProductDraft::new(category.clone(), format!("item {}", i))).await?);
        }
        let other = repo.save(ProductDraft::new(format!("{}_other", category), "x".into())).await?;

        let first = created[0].clone();
        let updated = repo.save(first.with_fields(category.clone(), "renamed".into())).await?;
        assert_eq!(updated.id, first.id);
        assert_eq!(repo.get(first.id).await?.unwrap().name, "renamed");

        let page = repo.scan_by_category(&category, PageRequest::new(Some(1), Some(2))?).await?;
        assert_eq!(page.total_elements, 5);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.items.iter().map(|p| p.id).collect::<Vec<_>>(), vec![created[2].id, created[3].id]);

        let categories = repo.distinct_categories().await?;
        let mine: Vec<&String> = categories.iter().filter(|c| c.starts_with(&category)).collect();
        assert_eq!(mine.len(), 2);

        for p in created.iter().chain(std::iter::once(&other)) {
            repo.delete(p).await?;
        }
        assert!(repo.get(first.id).await?.is_none());
        Ok(())
    }
}
