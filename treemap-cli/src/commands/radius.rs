//! Radius command - print the cluster radius policy.

use treemap::cluster::cluster_radius;

/// Highest zoom level listed in the table.
const TABLE_MAX_ZOOM: u8 = 20;

/// Run the radius command for one zoom level or the whole table.
pub fn run(zoom: Option<f64>) {
    match zoom {
        Some(zoom) => println!("{}", cluster_radius(zoom)),
        None => {
            println!("{:>5}  {}", "zoom", "radius");
            for zoom in 0..=TABLE_MAX_ZOOM {
                println!("{:>5}  {}", zoom, cluster_radius(zoom as f64));
            }
        }
    }
}
