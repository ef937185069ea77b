use std::sync::Arc;

use lazy_static::lazy_static;
use once_cell::sync::OnceCell;
use serde::Deserialize;
use url::{form_urlencoded, Url};
use warp::http::StatusCode;
use warp::Filter;

use log::o;
use video_catalog::db::MemoryDb;
use video_catalog::environment::{Config, Environment};
use video_catalog::routes;
use video_catalog::urls::Urls;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct HomeResponse {
    app_name: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct AddResponse {
    id: i64,
    video_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ListResponse {
    count: usize,
    videos: Vec<VideoResponse>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct VideoResponse {
    id: i64,
    name: String,
    url: String,
    notes: Option<String>,
    video_id: String,
    created_at: i64,
}

lazy_static! {
    static ref INVALID_URLS: Vec<&'static str> = vec![
        "https://www.youtube.com/watch",
        "https://www.youtube.com/watch?",
        "https://www.youtube.com/watch?abc=123",
        "https://www.youtube.com/watch?v=",
        "https://www.youtube.com/watch?v=%00x",
        "https://www.youtube.com/watch/somethingelse?v=1234567",
        "http://www.youtube.com/watch?v=1234567",
        "https://github.com",
        "https://minneapolis.edu",
        "https://minneapolis.edu?v=123456",
    ];
}

static SLOG_SCOPE_GUARD: OnceCell<slog_scope::GlobalLoggerGuard> = OnceCell::new();

const APP_NAME: &str = "Exercise Videos";
const VIDEOS_PATH: &str = "videos";

#[tokio::test]
async fn home_shows_app_name() {
    let filter = make_filter("home_shows_app_name");

    let response = get("/").reply(&filter).await;
    assert_eq!(response.status(), StatusCode::OK);

    let home: HomeResponse = serde_json::from_slice(response.body()).expect("parse home response");
    assert_eq!(home.app_name, APP_NAME);
}

#[tokio::test]
async fn adding_video_works() {
    let filter = make_filter("adding_video_works");

    let response = submit(
        Some("yoga"),
        Some("https://www.youtube.com/watch?v=4vTJHUDB5ak"),
        Some("yoga for neck and shoulders"),
    )
    .reply(&filter)
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);

    let headers = response.headers();
    assert!(headers.contains_key("server-timing"));

    let location = Url::parse(
        headers
            .get("location")
            .expect("get location header")
            .to_str()
            .expect("convert location header to string"),
    )
    .expect("parse location header");
    assert_eq!(location.domain(), Some("www.example.com"));
    assert_eq!(location.path(), "/videos/1/");

    let added: AddResponse = serde_json::from_slice(response.body()).expect("parse add response");
    assert_eq!(added.id, 1);
    assert_eq!(added.video_id, "4vTJHUDB5ak");

    let response = get(location.path()).reply(&filter).await;
    assert_eq!(response.status(), StatusCode::OK);

    let video: VideoResponse =
        serde_json::from_slice(response.body()).expect("parse video response");
    assert_eq!(video.id, 1);
    assert_eq!(video.name, "yoga");
    assert_eq!(video.url, "https://www.youtube.com/watch?v=4vTJHUDB5ak");
    assert_eq!(video.notes.as_deref(), Some("yoga for neck and shoulders"));
    assert_eq!(video.video_id, "4vTJHUDB5ak");
    assert!(video.created_at > 0);

    let list = list_videos(&filter, None).await;
    assert_eq!(list.count, 1);
    assert_eq!(list.videos[0].name, "yoga");
}

#[tokio::test]
async fn notes_are_optional() {
    let filter = make_filter("notes_are_optional");

    let response = submit(
        Some("example"),
        Some("https://www.youtube.com/watch?v=IODxDxX7oi4&ts=14"),
        None,
    )
    .reply(&filter)
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let list = list_videos(&filter, None).await;
    assert_eq!(list.videos[0].notes, None);
    assert_eq!(list.videos[0].video_id, "IODxDxX7oi4");
}

#[tokio::test]
async fn invalid_urls_are_not_added() {
    let filter = make_filter("invalid_urls_are_not_added");

    for url in INVALID_URLS.iter() {
        let response = submit(Some("example"), Some(url), Some("example notes"))
            .reply(&filter)
            .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{} must be rejected", url);
        assert_eq!(message(response.body()), "Invalid YouTube URL");
    }

    let list = list_videos(&filter, None).await;
    assert_eq!(list.count, 0);
}

#[tokio::test]
async fn incomplete_submissions_are_not_added() {
    let filter = make_filter("incomplete_submissions_are_not_added");
    let url = "https://www.youtube.com/watch?v=4vTJHUDB5ak";

    for (name, url, notes) in vec![
        (None, Some(url), None),
        (Some("  "), Some(url), None),
        (Some("yoga"), None, None),
        (Some("yoga"), Some(url), Some("bad\0notes")),
    ] {
        let response = submit(name, url, notes).reply(&filter).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(message(response.body()), "Please check the data entered.");
    }

    let list = list_videos(&filter, None).await;
    assert_eq!(list.count, 0);
}

#[tokio::test]
async fn duplicate_videos_are_rejected() {
    let filter = make_filter("duplicate_videos_are_rejected");

    let response = submit(Some("ZYX"), Some("https://www.youtube.com/watch?v=123"), None)
        .reply(&filter)
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = submit(
        Some("ZYX again"),
        Some("https://www.youtube.com/watch?v=123&ts=5"),
        None,
    )
    .reply(&filter)
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(message(response.body()), "You already added that video.");

    let list = list_videos(&filter, None).await;
    assert_eq!(list.count, 1);
    assert_eq!(list.videos[0].name, "ZYX");
}

#[tokio::test]
async fn videos_are_listed_by_name() {
    let filter = make_filter("videos_are_listed_by_name");

    assert_eq!(list_videos(&filter, None).await.count, 0);

    add_all(&filter, &[("XYZ", "123"), ("abc", "124"), ("AAA", "125"), ("lmn", "126")]).await;

    let list = list_videos(&filter, None).await;
    assert_eq!(list.count, 4);
    assert_eq!(names(&list), vec!["AAA", "abc", "lmn", "XYZ"]);
}

#[tokio::test]
async fn search_matches_names() {
    let filter = make_filter("search_matches_names");

    add_all(
        &filter,
        &[("ABC", "456"), ("nope", "789"), ("abc", "123"), ("hello aBc", "101")],
    )
    .await;

    let list = list_videos(&filter, Some("abc")).await;
    assert_eq!(names(&list), vec!["ABC", "abc", "hello aBc"]);

    let list = list_videos(&filter, Some("hello abc")).await;
    assert_eq!(names(&list), vec!["hello aBc"]);

    let list = list_videos(&filter, Some("kittens")).await;
    assert_eq!(list.count, 0);
    assert!(list.videos.is_empty());

    let list = list_videos(&filter, Some("")).await;
    assert_eq!(list.count, 4);
}

#[tokio::test]
async fn missing_videos_are_not_found() {
    let filter = make_filter("missing_videos_are_not_found");

    let response = get("/videos/201/").reply(&filter).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(message(response.body()), "no video with ID 201");

    let response = get("/videos/abc/").reply(&filter).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

fn make_filter(
    test_name: &str,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    initialize_global_logger();

    let logger = slog_scope::logger().new(o!("test" => test_name.to_owned()));
    let urls = Urls::new("https://www.example.com/", VIDEOS_PATH).expect("create Urls");

    let environment = Environment::new(
        Arc::new(logger),
        Arc::new(MemoryDb::new()),
        Arc::new(urls),
        Config::new(APP_NAME),
    );

    routes::make_api_routes(environment)
}

fn initialize_global_logger() {
    SLOG_SCOPE_GUARD.get_or_init(|| slog_envlogger::init().expect("initialize slog-envlogger"));
}

fn get(path: &str) -> warp::test::RequestBuilder {
    warp::test::request().path(path).method("GET")
}

fn submit(name: Option<&str>, url: Option<&str>, notes: Option<&str>) -> warp::test::RequestBuilder {
    let mut serializer = form_urlencoded::Serializer::new(String::new());

    for (key, value) in &[("name", name), ("url", url), ("notes", notes)] {
        if let Some(value) = value {
            serializer.append_pair(key, value);
        }
    }

    let body = serializer.finish();

    warp::test::request()
        .path(&format!("/{}/", VIDEOS_PATH))
        .method("POST")
        .header("content-type", "application/x-www-form-urlencoded")
        .header("content-length", body.len())
        .body(body)
}

async fn add_all<F>(filter: &F, videos: &[(&str, &str)])
where
    F: Filter + 'static,
    F::Extract: warp::Reply + Send,
{
    for (name, id) in videos {
        let url = format!("https://www.youtube.com/watch?v={}", id);
        let response = submit(Some(name), Some(&url), Some("example"))
            .reply(filter)
            .await;

        assert_eq!(response.status(), StatusCode::CREATED, "add {}", name);
    }
}

async fn list_videos<F>(filter: &F, search_term: Option<&str>) -> ListResponse
where
    F: Filter + 'static,
    F::Extract: warp::Reply + Send,
{
    let path = match search_term {
        Some(term) => format!(
            "/{}/?{}",
            VIDEOS_PATH,
            form_urlencoded::Serializer::new(String::new())
                .append_pair("search_term", term)
                .finish()
        ),
        None => format!("/{}/", VIDEOS_PATH),
    };

    let response = get(&path).reply(filter).await;
    assert_eq!(response.status(), StatusCode::OK);

    serde_json::from_slice(response.body()).expect("parse list response")
}

fn names(list: &ListResponse) -> Vec<&str> {
    list.videos.iter().map(|v| v.name.as_str()).collect()
}

fn message(body: &[u8]) -> String {
    let body: serde_json::Value = serde_json::from_slice(body).expect("parse error response");

    body["message"]
        .as_str()
        .expect("get error message as string")
        .to_owned()
}
