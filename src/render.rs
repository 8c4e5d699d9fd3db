use crate::{
    colormap::{ColorScale, VMAX},
    curve::{IsoCurve, DASHES},
    figure::CANVAS_SIZE,
    Axis, Figure, Result, SamplingField, SamplingParameters,
};

/// Renders the sampling field of a camera over a (magnification, numerical aperture) sweep
///
/// The field is the number of camera pixels per resolution element at every grid point.
/// One iso-sampling curve is computed for each threshold of the parameters.
pub fn render_sampling_field(
    magnification: &Axis,
    numerical_aperture: &Axis,
    params: &SamplingParameters,
) -> Result<Figure> {
    params.check()?;
    magnification.check_scale(params.x_scale)?;
    numerical_aperture.check_scale(params.y_scale)?;

    let optics = params.optics();
    let field = SamplingField::compute(magnification, numerical_aperture, &optics);
    field.summary(VMAX);

    let na_bounds = numerical_aperture.bounds();
    let curves: Vec<IsoCurve> = params
        .thresholds
        .iter()
        .zip(DASHES.iter().cycle())
        .map(|(&phi, &dash)| IsoCurve::new(phi, magnification, na_bounds, &optics).dash(dash))
        .collect();
    curves
        .iter()
        .filter(|curve| curve.is_empty())
        .for_each(|curve| log::warn!("{} curve is outside the sweep", curve.label()));

    Ok(Figure {
        field,
        x_scale: params.x_scale,
        y_scale: params.y_scale,
        color_scale: ColorScale::default(),
        curves,
        title: [
            "Optical Sampling Performance:".to_string(),
            format!(
                "{:.1} µm pixels, {:.0} nm, add. mag {:.1}×",
                params.pixel_ref_um, params.wavelength_nm, params.additional_mag
            ),
        ],
        x_label: format!("Magnification (add. mag {:.1}×)", params.additional_mag),
        y_label: format!("Numerical Aperture (λ = {:.0} nm)", params.wavelength_nm),
        size: CANVAS_SIZE,
    })
}
