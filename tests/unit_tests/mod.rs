use lagrange_fem::error::FemError;
use num::BigRational;

mod basis;
mod mesh;
mod wave;

pub fn rational(numer: i64, denom: i64) -> BigRational {
    BigRational::new(numer.into(), denom.into())
}

pub fn fem_error(report: &eyre::Report) -> &FemError {
    report
        .downcast_ref::<FemError>()
        .expect("Error should originate in the engine")
}
