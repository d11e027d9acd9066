use actix_files::{Files, NamedFile};
use actix_web::dev::{fn_service, ServiceRequest, ServiceResponse};
use std::path::Path;

/// Serves the pre-built client bundle. Paths without a matching file get
/// `index.html` so client-side routes resolve.
pub fn client_bundle(dist: &Path) -> Files {
    let index = dist.join("index.html");

    Files::new("/", dist)
        .index_file("index.html")
        .default_handler(fn_service(move |req: ServiceRequest| {
            let index = index.clone();
            async move {
                let (req, _) = req.into_parts();
                let file = NamedFile::open_async(index).await?;
                let res = file.into_response(&req);
                Ok(ServiceResponse::new(req, res))
            }
        }))
}
