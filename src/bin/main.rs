use nyquist_calculator::{
    parameters::THRESHOLDS, render_sampling_field, Axis, Sampling, SamplingParameters, Scale,
};
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "nyquist",
    about = "Microscope camera sampling performance versus magnification and numerical aperture"
)]
struct Opt {
    /// Illumination wavelength [nm]
    #[structopt(short, long, default_value = "500")]
    wavelength: f64,
    /// Camera pixel size [µm]
    #[structopt(short, long, default_value = "3.8")]
    pixel: f64,
    /// Additional magnification after the objective
    #[structopt(short, long = "add-mag", default_value = "1")]
    add_mag: f64,
    /// Magnification axis scale: linear or log
    #[structopt(short, long = "x-scale", default_value = "log")]
    x_scale: Scale,
    /// Numerical aperture axis scale: linear or log
    #[structopt(short, long = "y-scale", default_value = "linear")]
    y_scale: Scale,
    /// Iso-sampling curve thresholds (pixels per blur element), repeat for several curves
    #[structopt(short, long = "threshold")]
    thresholds: Vec<f64>,
    /// Disable the iso-sampling curves
    #[structopt(long)]
    no_curves: bool,
    /// Figure file name (SVG if the extension is `svg`, PNG otherwise)
    #[structopt(short, long, default_value = "nyquist.png")]
    output: String,
    /// Save the sampling field to a CSV file
    #[structopt(long)]
    csv: Option<String>,
    /// Figure width [pixel]
    #[structopt(long, default_value = "800")]
    width: u32,
    /// Figure height [pixel]
    #[structopt(long, default_value = "900")]
    height: u32,
    /// Reject parameters outside of the interactive controls ranges
    #[structopt(long)]
    strict: bool,
    /// Objective magnification to evaluate
    #[structopt(short = "m", long, requires = "na")]
    objective: Option<f64>,
    /// Objective numerical aperture to evaluate
    #[structopt(long, requires = "objective")]
    na: Option<f64>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let opt = Opt::from_args();

    let thresholds = match (opt.no_curves, opt.thresholds.is_empty()) {
        (true, _) => vec![],
        (false, true) => THRESHOLDS.to_vec(),
        (false, false) => opt.thresholds.clone(),
    };
    let params = SamplingParameters::default()
        .wavelength(opt.wavelength)
        .pixel_size(opt.pixel)
        .additional_magnification(opt.add_mag)
        .x_scale(opt.x_scale)
        .y_scale(opt.y_scale)
        .thresholds(thresholds);
    if opt.strict {
        params.check_host_ranges()?;
    } else if let Err(e) = params.check_host_ranges() {
        log::warn!("{e}");
    }
    log::debug!("{params:?}");

    if let (Some(objective), Some(na)) = (opt.objective, opt.na) {
        let optics = params.optics();
        let ratio = optics.sampling_ratio(objective, na);
        println!("OBJECTIVE {objective:.0}x/{na:.2}:");
        println!(
            " - resolution at the camera: {:.3}µm",
            optics.resolution(objective, na)
        );
        println!(" - pixels per blur element: {:.3}", ratio);
        println!(" - {}", Sampling::classify(ratio));
    }

    let figure = render_sampling_field(
        &Axis::magnification(),
        &Axis::numerical_aperture(),
        &params,
    )?
    .size((opt.width, opt.height));
    println!("{}", figure.field());

    if let Some(filename) = opt.csv {
        figure.field().to_csv(&filename)?;
        println!("sampling field saved to {filename}");
    }
    figure.save(&opt.output)?;
    println!("figure saved to {}", opt.output);

    Ok(())
}
