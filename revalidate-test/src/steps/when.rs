use anyhow::Error;
use cucumber::when;

use crate::world::RevalidateWorld;

#[when("the request is evaluated")]
fn request_evaluated(world: &mut RevalidateWorld) -> Result<(), Error> {
    world.evaluate()
}
