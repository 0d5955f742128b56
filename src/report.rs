use silhouette::SilhouetteError;

pub fn report_error(err: &SilhouetteError) {
    match err {
        SilhouetteError::NotFound { path } => {
            eprintln!("Input file not found: {}", path.display());
            eprintln!();
            eprintln!("Check that the path points to an existing image file.");
        }
        _ => {
            eprintln!("{err}");
        }
    }
}
