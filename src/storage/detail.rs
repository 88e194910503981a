use super::{Catalog, Error, Record};
use crate::domain::{
    Course, CourseDetail, Id, Instructor, InstructorDetail, Period, PeriodDetail, Registration,
    RegistrationDetail, Section, SectionDetail, Semester, SemesterDetail, Student, StudentDetail,
    Year, YearDetail,
};

/// A view of one record together with the records that reference it.
pub trait Detail: Sized {
    /// The record the view is centred on.
    type Record: Record;

    /// Loads the view of the record with the identifier `id`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if there is no such record.
    fn load(catalog: &Catalog, id: Id<Self::Record>) -> Result<Self, Error>;
}

impl Detail for YearDetail {
    type Record = Year;

    fn load(catalog: &Catalog, id: Id<Year>) -> Result<Self, Error> {
        Ok(Self {
            year: catalog.get(id)?,
            semesters: catalog.list_referencing("year_id", id)?,
        })
    }
}

impl Detail for PeriodDetail {
    type Record = Period;

    fn load(catalog: &Catalog, id: Id<Period>) -> Result<Self, Error> {
        Ok(Self {
            period: catalog.get(id)?,
            semesters: catalog.list_referencing("period_id", id)?,
        })
    }
}

impl Detail for CourseDetail {
    type Record = Course;

    fn load(catalog: &Catalog, id: Id<Course>) -> Result<Self, Error> {
        Ok(Self {
            course: catalog.get(id)?,
            sections: catalog.list_referencing("course_id", id)?,
        })
    }
}

impl Detail for InstructorDetail {
    type Record = Instructor;

    fn load(catalog: &Catalog, id: Id<Instructor>) -> Result<Self, Error> {
        Ok(Self {
            instructor: catalog.get(id)?,
            sections: catalog.list_referencing("instructor_id", id)?,
        })
    }
}

impl Detail for StudentDetail {
    type Record = Student;

    fn load(catalog: &Catalog, id: Id<Student>) -> Result<Self, Error> {
        Ok(Self {
            student: catalog.get(id)?,
            registrations: catalog.list_referencing("student_id", id)?,
        })
    }
}

impl Detail for SemesterDetail {
    type Record = Semester;

    fn load(catalog: &Catalog, id: Id<Semester>) -> Result<Self, Error> {
        Ok(Self {
            semester: catalog.get(id)?,
            sections: catalog.list_referencing("semester_id", id)?,
        })
    }
}

impl Detail for SectionDetail {
    type Record = Section;

    fn load(catalog: &Catalog, id: Id<Section>) -> Result<Self, Error> {
        Ok(Self {
            section: catalog.get(id)?,
            registrations: catalog.list_referencing("section_id", id)?,
        })
    }
}

impl Detail for RegistrationDetail {
    type Record = Registration;

    fn load(catalog: &Catalog, id: Id<Registration>) -> Result<Self, Error> {
        Ok(Self {
            registration: catalog.get(id)?,
        })
    }
}
