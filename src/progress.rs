use std::path::Path;
use std::time::Duration;

use console::style;
use indicatif::ProgressBar;

pub(crate) fn banner(root: &Path) {
    let target = if root == Path::new(".") {
        String::from("current directory")
    } else {
        style(format!("{}/", root.display())).bold().to_string()
    };
    println!("Bootstrapping {target} as appstamp app…\n");
}

pub(crate) fn creating_files() {
    println!("\nCreating files…");
}

pub(crate) fn file_written(path: &Path) {
    println!("{} {}", style("✓").green().bold(), path.display());
}

pub(crate) fn file_skipped(path: &Path) {
    println!("{} {} (skipped)", style("-").dim(), path.display());
}

pub(crate) fn creating_done() {
    println!("\n{} Creating files… done!", style("✓").green().bold());
}

pub(crate) fn install_spinner() -> ProgressBar {
    let bar = ProgressBar::new_spinner();
    bar.set_message("Installing npm dependencies…");
    bar.enable_steady_tick(Duration::from_millis(100));
    bar
}

pub(crate) fn install_done(bar: ProgressBar) {
    bar.finish_and_clear();
    println!(
        "{} Installing npm dependencies… done!",
        style("✓").green().bold()
    );
}

pub(crate) fn install_failed(bar: ProgressBar, error: &str) {
    bar.finish_and_clear();
    println!(
        "{} Installing npm dependencies… error!",
        style("✗").red().bold()
    );
    println!("{error}");
}

pub(crate) fn finish() {
    println!(
        "Your app has been bootstrapped! Just commit the changes and push the commit\n\
         to the origin/main branch:\n\n\
         {}\n\
         {}\n\n\
         Then you can build and deploy the app with {} and {}.",
        style("git add --all && git commit -m\"initial version of appstamp app\"").bold(),
        style("git push origin main").bold(),
        style("npm run build").bold(),
        style("npm run deploy").bold(),
    );
}
