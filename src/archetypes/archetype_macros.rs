/// Build an [Archetype](crate::archetypes::Archetype) from a list of component types registered in a world.
///
/// ```ignore
/// let archetype = archetype!(world, [Position, Velocity]);
/// ```
#[macro_export]
macro_rules! archetype {
    ($world: expr, [$($t: ty),* $(,)?]) => {
		$world.registry().archetype::<($($t,)*)>()
	};
}
