use crate::{
    axis::AxisError, field::FieldError, figure::FigureError, parameters::ParameterError,
};

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Error in the `axis` module")]
    Axis(#[from] AxisError),
    #[error("Error in the `parameters` module")]
    Parameter(#[from] ParameterError),
    #[error("Error in the `field` module")]
    Field(#[from] FieldError),
    #[error("Error in the `figure` module")]
    Figure(#[from] FigureError),
}
pub type Result<T> = std::result::Result<T, Error>;
