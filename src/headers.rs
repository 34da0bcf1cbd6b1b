use http_client::Request;

/// Identifying user agent sent with every request
pub const USER_AGENT: &str = "Spotube-EDMLive-Plugin/1.0 (+https://spotube.org)";

/// Accept header for regular HTML page requests
const ACCEPT_HTML: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";

/// Add the identifying headers shared by all requests
pub fn add_common_headers(request: &mut Request, user_agent: &str) {
    let _ = request.insert_header("User-Agent", user_agent);
    let _ = request.insert_header("Accept-Language", "en-US,en;q=0.9");
}

/// Add headers for GET requests of regular HTML pages
pub fn add_get_headers(request: &mut Request, user_agent: &str) {
    add_common_headers(request, user_agent);
    let _ = request.insert_header("Accept", ACCEPT_HTML);
}
