use sqlx::PgPool;

use crate::{
    error::Result,
    models::{NewCategory, NewProduct},
    queries::{category_queries, product_queries},
    store::MemoryCatalogStore,
    utils::slug::slugify,
};

pub struct CategoryFixture {
    pub name: &'static str,
    pub description: &'static str,
    pub products: &'static [ProductFixture],
}

pub struct ProductFixture {
    pub name: &'static str,
    pub description: &'static str,
    pub price: i64,
    pub stock: i32,
}

impl CategoryFixture {
    fn new_category(&self) -> NewCategory {
        NewCategory {
            name: self.name.to_string(),
            slug: slugify(self.name),
            description: self.description.to_string(),
        }
    }
}

impl ProductFixture {
    fn new_product(&self, category_id: i32) -> NewProduct {
        NewProduct {
            category_id,
            name: self.name.to_string(),
            description: self.description.to_string(),
            price: self.price,
            stock: self.stock,
            is_active: true,
        }
    }
}

const fn product(
    name: &'static str,
    description: &'static str,
    price: i64,
    stock: i32,
) -> ProductFixture {
    ProductFixture {
        name,
        description,
        price,
        stock,
    }
}

pub const CATALOG: &[CategoryFixture] = &[
    CategoryFixture {
        name: "Electrónicos",
        description: "Productos electrónicos y gadgets tecnológicos",
        products: &[
            product(
                "Smartphone Galaxy S22",
                "Último modelo con cámara de alta resolución y batería de larga duración",
                679990,
                25,
            ),
            product("Laptop ProBook 15\"", "Procesador i7, 16GB RAM, 512GB SSD", 1099990, 10),
            product(
                "Tablet UltraSlim 10.5\"",
                "Pantalla HD, 64GB almacenamiento, perfecta para entretenimiento",
                299990,
                15,
            ),
            product(
                "Audífonos Bluetooth NoiseCancel",
                "Cancelación de ruido activa, 30h de batería",
                169990,
                30,
            ),
        ],
    },
    CategoryFixture {
        name: "Ropa",
        description: "Vestimenta y accesorios de moda",
        products: &[
            product(
                "Chaqueta de Cuero Premium",
                "Cuero genuino, forro interior térmico, estilo clásico",
                219990,
                8,
            ),
            product("Jeans Slim Fit", "Tejido elástico, múltiples tallas disponibles", 49990, 35),
            product(
                "Camisa Formal Elegance",
                "Algodón 100%, corte ajustado, fácil planchado",
                39990,
                20,
            ),
            product("Zapatos de Cuero Urban", "Suela antideslizante, interior acolchado", 75990, 12),
        ],
    },
    CategoryFixture {
        name: "Hogar",
        description: "Artículos para el hogar y decoración",
        products: &[
            product(
                "Juego de Sábanas Premium",
                "100% algodón egipcio, 400 hilos, juego completo",
                69990,
                18,
            ),
            product(
                "Set de Cocina Profesional",
                "10 piezas, acero inoxidable, mangos ergonómicos",
                109990,
                7,
            ),
            product("Lámpara de Pie Moderna", "Luz LED ajustable, diseño minimalista", 59990, 15),
            product("Alfombra Luxury", "Tejido suave, antialérgica, 2x3 metros", 99990, 5),
        ],
    },
    CategoryFixture {
        name: "Deportes",
        description: "Equipo deportivo y accesorios para actividades físicas",
        products: &[
            product(
                "Bicicleta Montaña Pro",
                "21 velocidades, suspensión delantera, frenos de disco",
                429990,
                6,
            ),
            product(
                "Zapatillas Running Performance",
                "Amortiguación avanzada, transpirables, ligeras",
                109990,
                22,
            ),
            product("Set de Pesas Ajustables", "Ajuste rápido de peso, incluye soporte", 149990, 8),
            product("Balón de Fútbol Oficial", "Tamaño reglamentario, cosido a mano", 34990, 25),
        ],
    },
    CategoryFixture {
        name: "Belleza",
        description: "Productos de belleza y cuidado personal",
        products: &[
            product(
                "Set de Maquillaje Profesional",
                "24 tonos de sombras, base, corrector y más",
                75990,
                12,
            ),
            product(
                "Perfume Elegance Night",
                "Fragancia duradera con notas florales y amaderadas",
                59990,
                15,
            ),
            product(
                "Crema Hidratante Anti-edad",
                "Fórmula con retinol y vitamina C, uso diario",
                49990,
                20,
            ),
            product(
                "Secadora de Cabello Profesional",
                "2000W, tecnología iónica, 3 temperaturas",
                67990,
                9,
            ),
        ],
    },
];

/// Loads [`CATALOG`] in one transaction. Does nothing when any category already exists.
pub async fn seed_postgres(pool: &PgPool) -> Result<bool> {
    let mut tx = pool.begin().await?;

    if category_queries::count(&mut tx).await? > 0 {
        tracing::info!("Catalog already seeded, skipping");
        return Ok(false);
    }

    let mut product_count = 0;
    for fixture in CATALOG {
        let category = category_queries::insert_category(&mut tx, &fixture.new_category()).await?;
        for item in fixture.products {
            product_queries::insert_product(&mut tx, &item.new_product(category.id)).await?;
            product_count += 1;
        }
    }

    tx.commit().await?;

    tracing::info!(
        "Seeded {} categories and {} products",
        CATALOG.len(),
        product_count
    );

    Ok(true)
}

pub async fn seed_memory(store: &MemoryCatalogStore) -> Result<()> {
    for fixture in CATALOG {
        let category = store.insert_category(fixture.new_category()).await?;
        for item in fixture.products {
            store.insert_product(item.new_product(category.id)).await?;
        }
    }

    Ok(())
}

pub async fn seeded_memory_store() -> Result<MemoryCatalogStore> {
    let store = MemoryCatalogStore::new();
    seed_memory(&store).await?;
    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{models::ProductFilter, store::CatalogStore};

    #[test]
    fn every_category_has_four_products() {
        assert_eq!(CATALOG.len(), 5);
        for fixture in CATALOG {
            assert_eq!(fixture.products.len(), 4, "{}", fixture.name);
            assert!(fixture.products.iter().all(|p| p.price > 0 && p.stock >= 0));
        }
    }

    #[tokio::test]
    async fn memory_seed_matches_fixtures() {
        let store = seeded_memory_store().await.unwrap();

        let slugs: Vec<String> = store
            .list_categories()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.slug)
            .collect();
        assert_eq!(slugs, ["electronicos", "ropa", "hogar", "deportes", "belleza"]);

        let total = store.count_products(&ProductFilter::default()).await.unwrap();
        assert_eq!(total, 20);
    }
}
