pub mod smooth_gradient;
