//! Arm with elbow and claw hand, written as STL and OBJ.

use critter::limbs::{ClawLimb, Digit};
use critter::presets::sample_document;
use critter::{Model, Part};

fn main() {
    let mut model = Model::from_document(&sample_document()).unwrap();
    model.write("arm.stl").unwrap();
    println!("wrote arm.stl ({} triangles)", model.num_triangles());

    // A stubbier hand with a long center finger
    let hand = ClawLimb::hand()
        .with_wrist_scale([1.2, 0.8, 1.2])
        .with_digit_scale(Digit::Center, [1.0, 1.3, 1.4]);
    model = Model::new("hand");
    model.add(Part::new("hand", hand.merged().unwrap()).with_color([0.55, 0.45, 0.3]));
    model.write("hand.obj").unwrap();
    println!("wrote hand.obj");
}
