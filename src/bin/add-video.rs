use std::error::Error;

use dotenv::dotenv;
use sqlx::postgres::PgPool;
use structopt::StructOpt;

use log::{error, info, initialize_logger};
use video_catalog::catalog;
use video_catalog::config::get_variable;
use video_catalog::db::PgDb;
use video_catalog::video::Submission;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "add-video",
    about = "Add a YouTube video to the catalog"
)]
struct Opt {
    /// The name to list the video under
    name: String,

    /// The YouTube watch URL
    url: String,

    /// Free-form notes about the video
    #[structopt(long)]
    notes: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenv().ok();

    let opt = Opt::from_args();

    let logger = initialize_logger();

    let connection_string = get_variable("BACKEND_DB_CONNECTION_STRING");
    let pool = PgPool::connect(&connection_string).await?;
    let db = PgDb::new(pool);

    let submission = Submission {
        name: Some(opt.name),
        url: Some(opt.url),
        notes: opt.notes,
    };

    info!(logger, "Adding video..."; "url" => ?submission.url);

    match catalog::add(&db, submission).await {
        Ok(video) => {
            info!(logger, "Added video."; "id" => video.id(), "video_id" => %video.video_id());
            println!("{}", video.id());

            Ok(())
        }
        Err(e) => {
            error!(logger, "Could not add video: {}", e; "error" => ?e);

            Err(e.into())
        }
    }
}
