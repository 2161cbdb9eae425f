use anyhow::Context;
use clap::{error::ErrorKind, Parser};
use gfs_client::{
    backend::{cfg, LocalFs},
    delete::RecursiveDeleter,
    path::GridPath,
    session::Session,
};
use gfs_cli::{
    command::DeleteCommand,
    delete::{delete_target, TargetKind},
};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let cmd = match DeleteCommand::try_parse() {
        Ok(cmd) => cmd,
        Err(err) => {
            // usage problems exit 1; --help and --version are normal runs
            let code = match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
                _ => 1,
            };
            err.print().unwrap();
            std::process::exit(code);
        }
    };

    std::process::exit(run(cmd).await);
}

async fn run(cmd: DeleteCommand) -> i32 {
    let session = match open_session().await {
        Ok(session) => session,
        Err(err) => {
            eprintln!("Error: {:?}", err);
            return 1;
        }
    };

    let deleter = RecursiveDeleter::new(cmd.policy.into());

    let (kind, targets) = if let Some(uri) = &cmd.uri {
        (TargetKind::Uri, std::slice::from_ref(uri))
    } else if cmd.container {
        (TargetKind::Container, cmd.targets.as_slice())
    } else {
        (TargetKind::Path, cmd.targets.as_slice())
    };

    let mut failed = 0usize;
    for target in targets {
        match delete_target(&session, &deleter, kind, target).await {
            Ok(true) => {}
            Ok(false) => {
                println!("Failed to delete {}", target);
                failed += 1;
            }
            Err(err) => {
                // resolution fault, the batch stops here
                let err = anyhow::Error::new(err)
                    .context(format!("cannot resolve target {}", target));
                eprintln!("Error: {:?}", err);
                if let Err(close_err) = session.close().await {
                    tracing::debug!(error = %close_err, "session close after fatal fault");
                }
                return 1;
            }
        }
    }

    if let Err(err) = session.close().await {
        let err = anyhow::Error::new(err).context("session close failed");
        eprintln!("Error: {:?}", err);
        return 1;
    }

    if failed > 0 {
        1
    } else {
        0
    }
}

async fn open_session() -> anyhow::Result<Session> {
    let home = match std::env::current_dir() {
        Ok(cwd) => GridPath::parse(&cwd.to_string_lossy())
            .context("working directory is not usable as a grid path")?,
        Err(_) => GridPath::root(),
    };

    let session = Session::builder()
        .mount(cfg::LOCAL_SCHEME, LocalFs::new())
        .default_scheme(cfg::LOCAL_SCHEME)
        .home(home)
        .connect()
        .await
        .context("grid session setup failed")?;

    Ok(session)
}
