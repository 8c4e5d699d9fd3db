/*!
# Nyquist sampling calculator

Relates the optical magnification, the numerical aperture and the illumination wavelength
of a microscope to the camera pixel size, in order to choose a camera/objective combination
that samples the image at the Nyquist rate.

## Key Components

- [`resolution`] - camera referred Rayleigh resolution and its inverse at a given sampling ratio
- [`SamplingField`] - pixels per resolution element over a (numerical aperture, magnification) grid
- [`render_sampling_field`] - color mapped field with iso-sampling overlays, as a [`Figure`]

## Usage

```rust,no_run
use nyquist_calculator::{render_sampling_field, Axis, SamplingParameters, Scale};

let params = SamplingParameters::default()
    .wavelength(500.0)
    .pixel_size(6.5)
    .x_scale(Scale::Log);
let figure = render_sampling_field(
    &Axis::magnification(),
    &Axis::numerical_aperture(),
    &params,
)?;
figure.save("nyquist.png")?;
# Ok::<(), nyquist_calculator::Error>(())
```
*/

pub mod axis;
pub mod colormap;
pub mod curve;
mod error;
pub mod field;
pub mod figure;
pub mod parameters;
mod render;
pub mod resolution;

pub use axis::{Axis, Scale};
pub use error::{Error, Result};
pub use field::SamplingField;
pub use figure::Figure;
pub use parameters::SamplingParameters;
pub use render::render_sampling_field;
pub use resolution::{Optics, Sampling};
