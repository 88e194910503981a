//! Builders for small, consistent graphs of catalog records.
//!
//! Each `seed_*` function expects a catalog that does not yet hold the
//! records it creates; the graph builders create their own years, periods
//! and people, so they are meant for an empty catalog. [`seed_demo`] loads
//! everything at once for trying out the command line tool, and refuses a
//! catalog that already holds records.

use crate::{
    domain::{
        Course, CourseFields, EntityKind, Id, Instructor, Period, PeriodFields, PersonName,
        Registration, RegistrationFields, Section, SectionFields, Semester, SemesterFields,
        Student, Year, YearFields,
    },
    storage::{Catalog, Error},
};

/// The records created by [`seed_section`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionGraph {
    /// The `Spring` period.
    pub period: Id<Period>,
    /// The year 2022.
    pub year: Id<Year>,
    /// 2022 - Spring.
    pub semester: Id<Semester>,
    /// The instructor teaching the section.
    pub instructor: Id<Instructor>,
    /// IS439 - Web Development.
    pub course: Id<Course>,
    /// The section `OAG`.
    pub section: Id<Section>,
}

/// The records created by [`seed_registration`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegistrationGraph {
    /// The section and everything it references.
    pub section: SectionGraph,
    /// The registered student.
    pub student: Id<Student>,
    /// The student's registration in the section.
    pub registration: Id<Registration>,
}

/// Creates the years 2022 and 2021, in that order.
///
/// # Errors
///
/// Fails if either year already exists.
pub fn seed_years(catalog: &mut Catalog) -> Result<[Id<Year>; 2], Error> {
    Ok([
        catalog.create::<Year>(&YearFields { year: 2022 })?,
        catalog.create::<Year>(&YearFields { year: 2021 })?,
    ])
}

/// Creates the periods Spring, Summer and Fall.
///
/// # Errors
///
/// Fails if any period name already exists.
pub fn seed_periods(catalog: &mut Catalog) -> Result<[Id<Period>; 3], Error> {
    Ok([
        catalog.create::<Period>(&PeriodFields::new(1, "Spring"))?,
        catalog.create::<Period>(&PeriodFields::new(2, "Summer"))?,
        catalog.create::<Period>(&PeriodFields::new(3, "Fall"))?,
    ])
}

/// Creates the courses IS439 and IS455.
///
/// # Errors
///
/// Fails if either course already exists.
pub fn seed_courses(catalog: &mut Catalog) -> Result<[Id<Course>; 2], Error> {
    Ok([
        catalog.create::<Course>(&CourseFields::new("IS439", "Web Development"))?,
        catalog.create::<Course>(&CourseFields::new(
            "IS455",
            "Database Design and Prototyping",
        ))?,
    ])
}

fn people() -> [PersonName; 2] {
    [
        PersonName::new("Saurabh", "Saoji", "UIUC"),
        PersonName::new("Kevin", "Trainor", "UIUC"),
    ]
}

/// Creates two students.
///
/// # Errors
///
/// Fails if either student already exists.
pub fn seed_students(catalog: &mut Catalog) -> Result<[Id<Student>; 2], Error> {
    let [first, second] = people();
    Ok([
        catalog.create::<Student>(&first)?,
        catalog.create::<Student>(&second)?,
    ])
}

/// Creates two instructors, with the same names as the students.
///
/// # Errors
///
/// Fails if either instructor already exists.
pub fn seed_instructors(catalog: &mut Catalog) -> Result<[Id<Instructor>; 2], Error> {
    let [first, second] = people();
    Ok([
        catalog.create::<Instructor>(&first)?,
        catalog.create::<Instructor>(&second)?,
    ])
}

/// Creates 2022 - Spring and 2022 - Summer, along with the year and periods.
///
/// # Errors
///
/// Fails if any of the records already exist.
pub fn seed_semesters(catalog: &mut Catalog) -> Result<[Id<Semester>; 2], Error> {
    let spring = catalog.create::<Period>(&PeriodFields::new(1, "Spring"))?;
    let summer = catalog.create::<Period>(&PeriodFields::new(2, "Summer"))?;
    let year = catalog.create::<Year>(&YearFields { year: 2022 })?;
    Ok([
        catalog.create::<Semester>(&SemesterFields {
            year,
            period: spring,
        })?,
        catalog.create::<Semester>(&SemesterFields {
            year,
            period: summer,
        })?,
    ])
}

/// Creates the section `OAG` of IS439 in 2022 - Spring, and everything it
/// references.
///
/// # Errors
///
/// Fails if any of the records already exist.
pub fn seed_section(catalog: &mut Catalog) -> Result<SectionGraph, Error> {
    let period = catalog.create::<Period>(&PeriodFields::new(1, "Spring"))?;
    let year = catalog.create::<Year>(&YearFields { year: 2022 })?;
    let semester = catalog.create::<Semester>(&SemesterFields { year, period })?;
    let instructor =
        catalog.create::<Instructor>(&PersonName::new("Saurabh", "Saoji", "UIUC"))?;
    let course = catalog.create::<Course>(&CourseFields::new("IS439", "Web Development"))?;
    let section = catalog.create::<Section>(&SectionFields {
        name: "OAG".to_string(),
        semester,
        course,
        instructor,
    })?;

    Ok(SectionGraph {
        period,
        year,
        semester,
        instructor,
        course,
        section,
    })
}

/// Creates the graph of [`seed_section`] plus one student registered in the
/// section.
///
/// # Errors
///
/// Fails if any of the records already exist.
pub fn seed_registration(catalog: &mut Catalog) -> Result<RegistrationGraph, Error> {
    let section = seed_section(catalog)?;
    let student = catalog.create::<Student>(&PersonName::new("Saurabh", "Saoji", "UIUC"))?;
    let registration = catalog.create::<Registration>(&RegistrationFields {
        section: section.section,
        student,
    })?;

    Ok(RegistrationGraph {
        section,
        student,
        registration,
    })
}

/// Loads a small but complete catalog: two years, three periods, four
/// semesters, two courses, two instructors, two students, three sections and
/// three registrations.
///
/// # Errors
///
/// Returns [`Error::NotEmpty`] without writing anything if the catalog
/// already holds records of any kind.
pub fn seed_demo(catalog: &mut Catalog) -> Result<(), Error> {
    for kind in EntityKind::ALL {
        if catalog.count(kind)? > 0 {
            tracing::debug!("Refusing to seed: catalog holds {}", kind.plural());
            return Err(Error::NotEmpty);
        }
    }

    let [y2022, y2021] = seed_years(catalog)?;
    let [spring, _summer, fall] = seed_periods(catalog)?;
    let [web, database] = seed_courses(catalog)?;
    let [saoji, trainor] = seed_instructors(catalog)?;
    let [saurabh, kevin] = seed_students(catalog)?;

    let mut semester = |year, period| catalog.create::<Semester>(&SemesterFields { year, period });
    let fall_2021 = semester(y2021, fall)?;
    let spring_2022 = semester(y2022, spring)?;
    semester(y2021, spring)?;
    semester(y2022, fall)?;

    let sections = [
        SectionFields {
            name: "OAG".to_string(),
            semester: spring_2022,
            course: web,
            instructor: saoji,
        },
        SectionFields {
            name: "ONL".to_string(),
            semester: spring_2022,
            course: web,
            instructor: trainor,
        },
        SectionFields {
            name: "OAG".to_string(),
            semester: fall_2021,
            course: database,
            instructor: trainor,
        },
    ];
    let mut created = Vec::with_capacity(sections.len());
    for fields in &sections {
        created.push(catalog.create::<Section>(fields)?);
    }

    for (section, student) in [(created[0], saurabh), (created[0], kevin), (created[2], kevin)] {
        catalog.create::<Registration>(&RegistrationFields { section, student })?;
    }

    tracing::info!("Loaded demonstration catalog");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registration_graph_is_consistent() {
        let mut catalog = Catalog::open_in_memory().unwrap();
        let graph = seed_registration(&mut catalog).unwrap();

        let registration = catalog.get(graph.registration).unwrap();
        assert_eq!(registration.section.id, graph.section.section);
        assert_eq!(registration.section.semester.id, graph.section.semester);
        assert_eq!(registration.section.course.id, graph.section.course);
        assert_eq!(registration.section.instructor.id, graph.section.instructor);
        assert_eq!(registration.student.id, graph.student);
        assert_eq!(
            registration.to_string(),
            "IS439 - OAG 2022 - Spring / Saoji, Saurabh, (UIUC)"
        );
    }

    #[test]
    fn seeded_semesters_share_a_year() {
        let mut catalog = Catalog::open_in_memory().unwrap();
        let [spring, summer] = seed_semesters(&mut catalog).unwrap();

        let spring = catalog.get(spring).unwrap();
        let summer = catalog.get(summer).unwrap();
        assert_eq!(spring.year, summer.year);
        assert_eq!(spring.to_string(), "2022 - Spring");
        assert_eq!(summer.to_string(), "2022 - Summer");
    }

    #[test]
    fn demo_catalog_counts() {
        let mut catalog = Catalog::open_in_memory().unwrap();
        seed_demo(&mut catalog).unwrap();

        let counts: Vec<usize> = EntityKind::ALL
            .into_iter()
            .map(|kind| catalog.count(kind).unwrap())
            .collect();
        assert_eq!(counts, [2, 3, 2, 2, 2, 4, 3, 3]);
    }

    #[test]
    fn demo_cannot_be_loaded_twice() {
        let mut catalog = Catalog::open_in_memory().unwrap();
        seed_demo(&mut catalog).unwrap();
        assert!(matches!(seed_demo(&mut catalog), Err(Error::NotEmpty)));
        assert_eq!(catalog.count(EntityKind::Section).unwrap(), 3);
    }

    #[test]
    fn demo_leaves_a_partial_catalog_untouched() {
        let mut catalog = Catalog::open_in_memory().unwrap();
        catalog
            .create::<Course>(&CourseFields::new("IS439", "Web Development"))
            .unwrap();

        assert!(matches!(seed_demo(&mut catalog), Err(Error::NotEmpty)));

        let counts: Vec<usize> = EntityKind::ALL
            .into_iter()
            .map(|kind| catalog.count(kind).unwrap())
            .collect();
        assert_eq!(counts, [0, 0, 1, 0, 0, 0, 0, 0]);
    }
}
