use super::*;

/// Keeps lines that parse as an absolute origin (`scheme://host[:port]`).
/// Blank lines and `#` comments are skipped; anything else is logged and dropped.
pub fn parse_cors_origins<R: BufRead>(reader: R) -> Result<Vec<String>, IOError> {
    let mut origins = Vec::new();

    for line in reader.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        match line.parse::<Uri>() {
            Ok(uri) if uri.scheme().is_some() && uri.authority().is_some() => {
                origins.push(line.to_string());
            }
            Ok(_) => warn!("CORS origin needs scheme and host: {}", line),
            Err(e) => warn!("Invalid URI in CORS configuration: {}", e),
        }
    }

    Ok(origins)
}

/// Origins from the CORS file, or an empty list when the file is missing
/// or unusable. An empty list leaves CORS disabled.
pub fn load_cors_origins(path: &str) -> Vec<String> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            info!("{} not found, CORS disabled", path);
            return Vec::new();
        }
        Err(e) => {
            error!("Failed to open {}: {}, CORS disabled", path, e);
            return Vec::new();
        }
    };

    match parse_cors_origins(BufReader::new(file)) {
        Ok(origins) if origins.is_empty() => {
            warn!("{} holds no valid origin, CORS disabled", path);
            origins
        }
        Ok(origins) => {
            info!("Allowed CORS origins: {:?}", origins);
            origins
        }
        Err(e) => {
            error!("Failed to read {}: {}, CORS disabled", path, e);
            Vec::new()
        }
    }
}

pub fn build_cors(origins: &[String]) -> Cors {
    let cors = Cors::default()
        .allowed_methods(vec!["GET", "POST"])
        .allowed_header(header::CONTENT_TYPE)
        .max_age(3600);
    origins
        .iter()
        .fold(cors, |cors, origin| cors.allowed_origin(origin))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, test};
    use justvaluestore::ValueStore;
    use std::io::Cursor;

    const ALLOWED: &str = "http://localhost:3000";

    #[::core::prelude::v1::test]
    fn keeps_valid_origins_only() {
        let input = "http://localhost:3000\n\n# staging\n  https://example.com  \nnot a uri\n/relative\n";
        let origins = parse_cors_origins(Cursor::new(input)).unwrap();
        assert_eq!(origins, vec!["http://localhost:3000", "https://example.com"]);
    }

    #[::core::prelude::v1::test]
    fn missing_file_disables_cors() {
        assert!(load_cors_origins("/nonexistent/justvaluestore/.env_cors").is_empty());
    }

    #[actix_web::test]
    async fn listed_origin_gets_cors_headers() {
        let origins = vec![ALLOWED.to_string()];
        let app = test::init_service(
            App::new()
                .wrap(Condition::new(!origins.is_empty(), build_cors(&origins)))
                .app_data(web::Data::new(ValueStore::new()))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/")
            .insert_header((header::ORIGIN, ALLOWED))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(
            res.headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .unwrap()
                .to_str()
                .unwrap(),
            ALLOWED
        );

        let req = test::TestRequest::default()
            .method(actix_web::http::Method::OPTIONS)
            .uri("/")
            .insert_header((header::ORIGIN, ALLOWED))
            .insert_header((header::ACCESS_CONTROL_REQUEST_METHOD, "POST"))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert!(res.status().is_success());
        let methods = res
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_METHODS)
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();
        assert!(methods.contains("GET") && methods.contains("POST"));
    }

    #[actix_web::test]
    async fn unlisted_origin_preflight_is_refused() {
        let app = test::init_service(
            App::new()
                .wrap(build_cors(&[ALLOWED.to_string()]))
                .app_data(web::Data::new(ValueStore::new()))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::default()
            .method(actix_web::http::Method::OPTIONS)
            .uri("/")
            .insert_header((header::ORIGIN, "http://evil.example"))
            .insert_header((header::ACCESS_CONTROL_REQUEST_METHOD, "POST"))
            .to_request();
        match test::try_call_service(&app, req).await {
            Ok(res) => {
                assert!(!res.status().is_success());
                assert!(res
                    .headers()
                    .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                    .is_none());
            }
            Err(e) => assert!(e.as_response_error().status_code().is_client_error()),
        }
    }

    #[actix_web::test]
    async fn disabled_cors_adds_no_headers() {
        let origins: Vec<String> = Vec::new();
        let app = test::init_service(
            App::new()
                .wrap(Condition::new(!origins.is_empty(), build_cors(&origins)))
                .app_data(web::Data::new(ValueStore::new()))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/")
            .insert_header((header::ORIGIN, ALLOWED))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);
        assert!(res
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .is_none());
    }
}
