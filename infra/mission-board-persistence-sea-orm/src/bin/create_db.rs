use mission_board_persistence_sea_orm::{create_db_pool, create_schema};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let pool = match create_db_pool().await {
        Ok(pool) => pool,
        Err(e) => {
            eprintln!("Failed to connect to database: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = create_schema(&pool).await {
        eprintln!("Failed to create database tables: {}", e);
        std::process::exit(1);
    }

    println!("Created database tables successfully");
}
