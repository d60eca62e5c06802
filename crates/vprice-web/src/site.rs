use actix_files::{Files, NamedFile};
use actix_web::{get, web, Result};
use std::path::PathBuf;

struct StaticDir(PathBuf);

/// Landing page at `/` plus its assets under `/static`.
pub fn configure(static_dir: PathBuf) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg: &mut web::ServiceConfig| {
        cfg.app_data(web::Data::new(StaticDir(static_dir.clone())))
            .service(landing)
            .service(Files::new("/static", static_dir));
    }
}

#[get("/")]
async fn landing(dir: web::Data<StaticDir>) -> Result<NamedFile> {
    Ok(NamedFile::open_async(dir.0.join("index.html")).await?)
}
