/// RegionSet maintains a total assignment of units to regions, with O(1)
/// reassignment and an O(1) view of the members of every region.
#[derive(Debug, Clone)]
pub(crate) struct RegionSet {
    members: Vec<Vec<usize>>, // members[r] = units currently in region r
    region: Vec<u32>,         // region[u] = r when u is in members[r]
    position: Vec<usize>,     // position[u] = i when members[r][i] is u
}

impl RegionSet {
    /// Build from a complete slice of assignments over `num_regions` regions.
    pub(crate) fn new(num_regions: usize, assignments: &[u32]) -> Self {
        let mut members = vec![Vec::new(); num_regions];
        let mut position = Vec::with_capacity(assignments.len());
        for (unit, &region) in assignments.iter().enumerate() {
            assert!((region as usize) < num_regions, "region {region} out of range");
            position.push(members[region as usize].len());
            members[region as usize].push(unit);
        }
        Self { members, region: assignments.to_vec(), position }
    }

    #[inline] pub(crate) fn num_regions(&self) -> usize { self.members.len() }

    #[cfg(test)]
    #[inline] pub(crate) fn num_units(&self) -> usize { self.region.len() }

    /// Region of `unit`.
    #[inline]
    pub(crate) fn find(&self, unit: usize) -> u32 {
        debug_assert!(unit < self.region.len(), "unit out of range");
        self.region[unit]
    }

    /// Units currently in `region`.
    #[inline]
    pub(crate) fn get(&self, region: u32) -> &[usize] {
        debug_assert!((region as usize) < self.members.len(), "region out of range");
        &self.members[region as usize]
    }

    /// Complete assignment vector, indexed by unit.
    #[cfg(test)]
    #[inline] pub(crate) fn assignments(&self) -> &[u32] { &self.region }

    /// Move `unit` to `region`.
    pub(crate) fn move_to(&mut self, unit: usize, region: u32) {
        debug_assert!((region as usize) < self.members.len(), "region out of range");

        let (prev, pos) = (self.region[unit] as usize, self.position[unit]);
        if prev == region as usize { return }

        // Remove from previous region by swapping with last member.
        let last = self.members[prev].pop().unwrap();
        if last != unit {
            self.members[prev][pos] = last;
            self.position[last] = pos;
        }

        self.region[unit] = region;
        self.position[unit] = self.members[region as usize].len();
        self.members[region as usize].push(unit);
    }
}
